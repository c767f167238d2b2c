//! Retry module
//! - policy.rs: attempt budget and the two backoff tracks
//! - state.rs: attempt outcomes and the retry state machine
//! - clock.rs: injectable sleep primitive

pub mod clock;
pub mod policy;
pub mod state;

pub use clock::*;
pub use policy::*;
pub use state::*;
