//! Resilient request executor
//!
//! Sends one logical request, retrying 429 responses and transport failures
//! with exponential backoff until the attempt budget runs out. Every other
//! non-success status is terminal on first sight, 5xx included.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;

use crate::error::AnalysisError;
use crate::execution::http::{HttpTransport, HttpTransportResponse, ReqwestTransport};
use crate::retry::{
    AttemptOutcome, RATE_LIMIT_STATUS, RetryPolicy, RetryState, Sleeper, TokioSleeper,
};
use crate::types::RequestSpec;

/// Drives the retry state machine over an injected transport and sleeper.
///
/// Holds no per-call state, so one executor can serve concurrent calls.
#[derive(Clone)]
pub struct ResilientExecutor {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for ResilientExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientExecutor").finish_non_exhaustive()
    }
}

impl ResilientExecutor {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Executor over a default `reqwest` client.
    pub fn with_reqwest(timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        Ok(Self::new(Arc::new(ReqwestTransport::with_timeout(timeout)?)))
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Execute `request`, returning the success body or the terminal failure.
    pub async fn execute(
        &self,
        request: &RequestSpec,
        policy: &RetryPolicy,
    ) -> Result<Vec<u8>, AnalysisError> {
        let max_attempts = policy.attempt_budget();
        let mut state = RetryState::start();

        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    tracing::debug!(
                        target: "imgscope::http",
                        url = %request.url,
                        attempt = attempt + 1,
                        max_attempts,
                        "sending request"
                    );
                    let result = self.transport.execute_json(request).await;
                    match &result {
                        Ok(resp) => tracing::debug!(
                            target: "imgscope::http",
                            url = %request.url,
                            status = resp.status,
                            retry_after = retry_after_hint(resp).unwrap_or("-"),
                            "response received"
                        ),
                        Err(err) => tracing::debug!(
                            target: "imgscope::http",
                            url = %request.url,
                            err = %err,
                            "transport error"
                        ),
                    }
                    RetryState::Attempting { attempt }
                        .on_outcome(AttemptOutcome::classify(result), policy)
                }
                RetryState::BackingOff {
                    attempt,
                    track,
                    delay,
                } => {
                    tracing::warn!(
                        target: "imgscope::http",
                        url = %request.url,
                        track = track.as_str(),
                        delay_ms = delay_millis(delay),
                        attempt = attempt + 1,
                        max_attempts,
                        "retrying after backoff"
                    );
                    self.sleeper.sleep(delay).await;
                    RetryState::BackingOff {
                        attempt,
                        track,
                        delay,
                    }
                    .resume()
                }
                RetryState::Succeeded(body) => return Ok(body),
                RetryState::Failed(err) => {
                    tracing::debug!(
                        target: "imgscope::http",
                        url = %request.url,
                        err = %err,
                        "request failed"
                    );
                    return Err(err);
                }
            };
        }
    }
}

/// Server-provided `Retry-After` value on a rate-limited response.
///
/// Logged for diagnosis only; the backoff schedule stays fixed.
fn retry_after_hint(resp: &HttpTransportResponse) -> Option<&str> {
    if resp.status != RATE_LIMIT_STATUS {
        return None;
    }
    resp.headers.get(RETRY_AFTER).and_then(|v| v.to_str().ok())
}

fn delay_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
