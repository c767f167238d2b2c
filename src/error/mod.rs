//! Error Handling Module
//!
//! This module provides error handling for the analysis pipeline, including:
//! - Core error types (`AnalysisError`, `TransportError`, `ErrorCategory`)
//! - User-facing error summaries that keep "no answer" and "malformed answer" apart
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use imgscope::error::{AnalysisError, ErrorCategory};
//!
//! let error = AnalysisError::http_status(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(error.is_unanswered());
//! ```

// Module declarations
mod conversions;
pub mod helpers;
pub mod types;

// Re-exports for public API
pub use helpers::*;
pub use types::*;
