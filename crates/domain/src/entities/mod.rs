mod pool;
mod position;
mod strategy;

pub use pool::{PoolState, Scenario};
pub use position::{Portfolio, Position};
pub use strategy::Strategy;
