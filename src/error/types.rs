//! Core error types

use thiserror::Error;

/// Coarse classification of a transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportErrorKind {
    /// The endpoint could not be reached (DNS, refused, reset).
    #[error("connect")]
    Connect,
    /// The request or response exceeded the configured timeout.
    #[error("timeout")]
    Timeout,
    /// The response body could not be read to completion.
    #[error("body")]
    Body,
    /// Any other failure raised by the HTTP stack while sending.
    #[error("request")]
    Request,
}

/// A failure below the HTTP status layer: no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }
}

/// Terminal errors surfaced by the analysis pipeline.
///
/// Retryable conditions (429 responses, transient transport failures) are
/// handled inside the executor and only reach this type once the attempt
/// budget is exhausted.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// The source asset could not be read or encoded.
    #[error("Asset unreadable: {0}")]
    AssetUnreadable(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    HttpStatus {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// No response could be obtained from the endpoint.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The call succeeded but the body did not carry the expected result.
    #[error("Malformed response shape: {0}")]
    MalformedResponse(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request body could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Error categories used for presentation and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Asset,
    Authentication,
    RateLimit,
    Client,
    Server,
    Network,
    Parsing,
    Configuration,
}

impl AnalysisError {
    /// Build an HTTP status error without structured details.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status code, when the failure carries one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AssetUnreadable(_) => ErrorCategory::Asset,
            Self::HttpStatus { status, .. } => match *status {
                401 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                400..=499 => ErrorCategory::Client,
                _ => ErrorCategory::Server,
            },
            Self::Transport(_) => ErrorCategory::Network,
            Self::MalformedResponse(_) => ErrorCategory::Parsing,
            Self::ConfigurationError(_) | Self::SerializationError(_) => {
                ErrorCategory::Configuration
            }
        }
    }

    /// True when no answer could be obtained (terminal HTTP or transport failure).
    pub const fn is_unanswered(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Transport(_))
    }

    /// True when the endpoint answered but violated the response contract.
    pub const fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}
