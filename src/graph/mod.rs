pub mod factorials;
pub use factorials::*;

pub mod graph;
pub use graph::*;

pub mod node;
pub use node::*;

pub mod seminode;
pub use seminode::*;
