//! Request execution
//!
//! - `http`: transport abstraction and header helpers
//! - `executor`: the resilient attempt loop

pub mod executor;
pub mod http;

pub use executor::ResilientExecutor;
