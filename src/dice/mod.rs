pub mod iterator;
pub use iterator::*;

pub mod moves;
pub use moves::*;

pub mod roll;
pub use roll::*;

pub mod scorer;
pub use scorer::*;
