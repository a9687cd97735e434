pub mod climber;
pub use climber::*;

pub mod expectation;
pub use expectation::*;

pub mod partial;
pub use partial::*;

pub mod state;
pub use state::*;

pub mod strategy;
pub use strategy::*;
