pub mod arena;
pub use arena::*;

pub mod outcome;
pub use outcome::*;

pub mod record;
pub use record::*;
