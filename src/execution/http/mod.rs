//! HTTP Utilities
//!
//! This module contains HTTP-related utilities:
//! - Header management
//! - Transport abstraction and the reqwest-backed implementation

pub mod headers;
pub mod transport;

// Re-export main types
pub use headers::*;
pub use transport::*;
