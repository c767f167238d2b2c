//! Conversions from third-party error types

use super::types::{AnalysisError, TransportError, TransportErrorKind};

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, err.to_string())
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::AssetUnreadable(err.to_string())
    }
}

impl From<base64::DecodeError> for AnalysisError {
    fn from(err: base64::DecodeError) -> Self {
        Self::AssetUnreadable(format!("invalid base64 payload: {err}"))
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
