//! Compute module - Grid, transition rule and the parallel turn engine.

mod distributor;
mod grid;
mod partition;
mod rule;
mod worker;

pub use distributor::*;
pub use grid::*;
pub use partition::*;
pub use rule::*;
pub use worker::*;
