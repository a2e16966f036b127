//! Schema module - Run configuration and event types.

mod config;
mod event;

pub use config::*;
pub use event::*;
