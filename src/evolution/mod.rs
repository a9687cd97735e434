pub mod checkpoint;
pub use checkpoint::*;

pub mod pool;
pub use pool::*;

pub mod population;
pub use population::*;

pub mod progress;
pub use progress::*;

pub mod seed;
pub use seed::*;

pub mod trainer;
pub use trainer::*;
