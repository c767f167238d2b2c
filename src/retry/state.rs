//! Attempt outcomes and the retry state machine.
//!
//! The executor drives a `RetryState` through pure transitions:
//!
//! ```text
//! Attempting --success--------------------> Succeeded
//! Attempting --fatal / retryable on last--> Failed
//! Attempting --retryable------------------> BackingOff --resume--> Attempting
//! ```
//!
//! Only `Succeeded` and `Failed` leave the executor, so retryable outcomes
//! never reach the caller.

use std::time::Duration;

use super::policy::{BackoffTrack, RetryPolicy};
use crate::error::{AnalysisError, TransportError};
use crate::execution::http::HttpTransportResponse;

/// Status code signalling rate limiting.
pub const RATE_LIMIT_STATUS: u16 = 429;

/// Classified result of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Success status; carries the response body.
    Success(Vec<u8>),
    /// 429 response; carries the body for the terminal error should retries run out.
    RetryableRateLimited { body: Vec<u8> },
    /// No response was obtained.
    RetryableTransportFailure(TransportError),
    /// Any other non-success status.
    FatalHttpError { status: u16, body: Vec<u8> },
    /// A transport failure on the final attempt.
    FatalTransportFailure(TransportError),
}

impl AttemptOutcome {
    /// Classify what the transport produced for one attempt.
    pub fn classify(result: Result<HttpTransportResponse, TransportError>) -> Self {
        match result {
            Err(e) => Self::RetryableTransportFailure(e),
            Ok(resp) if (200..300).contains(&resp.status) => Self::Success(resp.body),
            Ok(resp) if resp.status == RATE_LIMIT_STATUS => {
                Self::RetryableRateLimited { body: resp.body }
            }
            Ok(resp) => Self::FatalHttpError {
                status: resp.status,
                body: resp.body,
            },
        }
    }

    /// Backoff track for retryable outcomes, `None` otherwise.
    pub const fn backoff_track(&self) -> Option<BackoffTrack> {
        match self {
            Self::RetryableRateLimited { .. } => Some(BackoffTrack::RateLimit),
            Self::RetryableTransportFailure(_) => Some(BackoffTrack::Transport),
            _ => None,
        }
    }

    /// Convert a retryable outcome into the fatal outcome of the same category.
    pub fn exhausted(self) -> Self {
        match self {
            Self::RetryableRateLimited { body } => Self::FatalHttpError {
                status: RATE_LIMIT_STATUS,
                body,
            },
            Self::RetryableTransportFailure(e) => Self::FatalTransportFailure(e),
            other => other,
        }
    }
}

/// Retry loop state.
#[derive(Debug, Clone)]
pub enum RetryState {
    /// About to issue attempt `attempt` (0-based).
    Attempting { attempt: u32 },
    /// Attempt `attempt` failed retryably; wait `delay` before the next one.
    BackingOff {
        attempt: u32,
        track: BackoffTrack,
        delay: Duration,
    },
    Succeeded(Vec<u8>),
    Failed(AnalysisError),
}

impl RetryState {
    pub const fn start() -> Self {
        Self::Attempting { attempt: 0 }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// Apply the outcome of the current attempt.
    ///
    /// Only meaningful in `Attempting`; other states are returned unchanged.
    pub fn on_outcome(self, outcome: AttemptOutcome, policy: &RetryPolicy) -> Self {
        let Self::Attempting { attempt } = self else {
            return self;
        };

        let outcome = match outcome.backoff_track() {
            Some(track) if !policy.is_last_attempt(attempt) => {
                return Self::BackingOff {
                    attempt,
                    track,
                    delay: policy.calculate_delay(track, attempt),
                };
            }
            Some(_) => outcome.exhausted(),
            None => outcome,
        };

        match outcome {
            AttemptOutcome::Success(body) => Self::Succeeded(body),
            AttemptOutcome::FatalHttpError { status, body } => {
                Self::Failed(http_status_error(status, &body))
            }
            AttemptOutcome::FatalTransportFailure(e)
            | AttemptOutcome::RetryableTransportFailure(e) => {
                Self::Failed(AnalysisError::Transport(e))
            }
            AttemptOutcome::RetryableRateLimited { body } => {
                Self::Failed(http_status_error(RATE_LIMIT_STATUS, &body))
            }
        }
    }

    /// Leave `BackingOff` once the delay has elapsed.
    pub fn resume(self) -> Self {
        match self {
            Self::BackingOff { attempt, .. } => Self::Attempting {
                attempt: attempt + 1,
            },
            other => other,
        }
    }
}

/// Build the terminal status error, preferring the service's own error message.
fn http_status_error(status: u16, body: &[u8]) -> AnalysisError {
    let details = serde_json::from_slice::<serde_json::Value>(body).ok();
    let message = details
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
    AnalysisError::HttpStatus {
        status,
        message,
        details,
    }
}
