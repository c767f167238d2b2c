//! User-facing error helpers.
//!
//! The pipeline has two fundamentally different ways of not producing an
//! analysis: the endpoint could not be asked (connectivity, status codes), or
//! it answered with something that is not an analysis. Callers present these
//! differently, so the summary keeps them apart.

use super::types::{AnalysisError, ErrorCategory};

/// Failure kind for presentation (coarse-grained)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No answer was obtained: terminal transport or HTTP status failure.
    Unanswered,
    /// An answer arrived but did not contain a usable analysis.
    MalformedAnswer,
    /// The asset could not be read or encoded.
    InvalidAsset,
    /// The client is configured incorrectly.
    Misconfigured,
}

/// Structured error summary for CLI/UI consumption
#[derive(Debug, Clone)]
pub struct ErrorSummary {
    pub kind: FailureKind,
    pub status: Option<u16>,
    /// Short message suitable for end users
    pub user_message: String,
    /// Underlying error text for verbose display
    pub detail: String,
    pub suggestions: Vec<String>,
}

/// Map an `AnalysisError` to its presentation kind.
pub fn failure_kind(err: &AnalysisError) -> FailureKind {
    match err {
        AnalysisError::HttpStatus { .. } | AnalysisError::Transport(_) => FailureKind::Unanswered,
        AnalysisError::MalformedResponse(_) => FailureKind::MalformedAnswer,
        AnalysisError::AssetUnreadable(_) => FailureKind::InvalidAsset,
        AnalysisError::ConfigurationError(_) | AnalysisError::SerializationError(_) => {
            FailureKind::Misconfigured
        }
    }
}

/// User-facing message for an error; distinct for every `FailureKind`.
pub fn user_message(err: &AnalysisError) -> String {
    match failure_kind(err) {
        FailureKind::Unanswered => match err.status_code() {
            Some(429) => "The analysis service is busy. Please try again in a moment.".to_string(),
            Some(status) => format!("The analysis service rejected the request (HTTP {status})."),
            None => "Could not reach the analysis service. Check your connection.".to_string(),
        },
        FailureKind::MalformedAnswer => {
            "The analysis service responded, but the response did not contain an analysis."
                .to_string()
        }
        FailureKind::InvalidAsset => "The selected image could not be read.".to_string(),
        FailureKind::Misconfigured => "The analysis client is not configured correctly.".to_string(),
    }
}

/// Suggest fixes based on the error category.
pub fn suggest_fixes(err: &AnalysisError) -> Vec<String> {
    let mut tips = Vec::new();
    match err.category() {
        ErrorCategory::Authentication => {
            tips.push("Verify the API key".to_string());
        }
        ErrorCategory::RateLimit => {
            tips.push("Wait before submitting again or raise the retry budget".to_string());
        }
        ErrorCategory::Client => {
            if err.status_code() == Some(403) {
                tips.push("Check project permissions and billing for the API key".to_string());
            }
            tips.push("Check the endpoint URL and model name".to_string());
        }
        ErrorCategory::Server => {
            tips.push("The service reported an internal error; try again later".to_string());
        }
        ErrorCategory::Network => {
            tips.push("Check network connectivity and proxy settings".to_string());
            tips.push("Increase the request timeout for large images".to_string());
        }
        ErrorCategory::Parsing => {
            tips.push("The service contract may have changed; check the model name".to_string());
            tips.push("Content may have been blocked by safety filters".to_string());
        }
        ErrorCategory::Asset => {
            tips.push("Make sure the file exists and is a supported image".to_string());
        }
        ErrorCategory::Configuration => {
            tips.push("Check environment variables and client configuration".to_string());
        }
    }
    tips
}

/// Summarize an `AnalysisError` for presentation.
pub fn summarize_error(err: &AnalysisError) -> ErrorSummary {
    ErrorSummary {
        kind: failure_kind(err),
        status: err.status_code(),
        user_message: user_message(err),
        detail: err.to_string(),
        suggestions: suggest_fixes(err),
    }
}

/// Render a CLI-friendly string for ErrorSummary.
pub fn format_summary(summary: &ErrorSummary, verbose: bool) -> String {
    let mut out = String::new();
    if let Some(code) = summary.status {
        out.push_str(&format!("Status: {code}\n"));
    }
    out.push_str(&format!("Message: {}\n", summary.user_message));
    if !summary.suggestions.is_empty() {
        out.push_str("Suggestions:\n");
        for s in &summary.suggestions {
            out.push_str(&format!("  - {s}\n"));
        }
    }
    if verbose {
        out.push_str(&format!("Detail: {}\n", summary.detail));
    }
    out
}
