//! # imgscope
//!
//! Resilient image analysis against multimodal `generateContent` endpoints.
//!
//! A call runs three stages in order:
//! - **Encoding**: a [`BinaryAsset`](encoding::BinaryAsset) becomes a base64
//!   [`EncodedPayload`](encoding::EncodedPayload)
//! - **Execution**: the request is sent through a
//!   [`ResilientExecutor`](execution::ResilientExecutor), which retries 429s and
//!   transport failures with bounded exponential backoff
//! - **Extraction**: the analysis text is read from a fixed path in the
//!   response; a missing field is a distinct error from a failed call
//!
//! ```rust,no_run
//! use imgscope::prelude::*;
//!
//! # async fn example() -> Result<(), AnalysisError> {
//! let analyzer = ImageAnalyzer::new(AnalyzerConfig::from_env()?)?;
//! match analyzer.analyze_file("photo.png", "Describe this image in English and French.").await {
//!     Ok(result) => println!("{}", result.text),
//!     Err(err) => eprintln!("{}", user_message(&err)),
//! }
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod execution;
pub mod extraction;
pub mod retry;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use client::ImageAnalyzer;
pub use config::AnalyzerConfig;
pub use error::AnalysisError;

/// Commonly used types
pub mod prelude {
    pub use crate::client::ImageAnalyzer;
    pub use crate::config::AnalyzerConfig;
    pub use crate::encoding::{BinaryAsset, EncodedPayload, encode_asset};
    pub use crate::error::{
        AnalysisError, FailureKind, TransportError, TransportErrorKind, summarize_error,
        user_message,
    };
    pub use crate::execution::ResilientExecutor;
    pub use crate::execution::http::{HttpTransport, HttpTransportResponse, ReqwestTransport};
    pub use crate::extraction::{decode_response_body, extract_analysis};
    pub use crate::retry::{
        AttemptOutcome, BackoffTrack, RecordingSleeper, RetryPolicy, RetryState, Sleeper,
        TokioSleeper,
    };
    pub use crate::types::{AnalysisResult, GenerationConfig, RequestSpec};
}
