//! Retry policy configuration
//!
//! Backoff is strictly exponential without jitter or a per-delay ceiling; the
//! attempt budget bounds the total wait.

use std::time::Duration;

/// Which backoff track a retry is scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffTrack {
    /// The endpoint answered 429.
    RateLimit,
    /// No response could be obtained.
    Transport,
}

impl BackoffTrack {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RateLimit => "rate_limit",
            Self::Transport => "transport",
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Base delay before retrying a rate-limited attempt
    pub rate_limit_base_delay: Duration,
    /// Base delay before retrying a transport failure
    pub transport_base_delay: Duration,
    /// Backoff multiplier applied per retry
    pub backoff_multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            rate_limit_base_delay: Duration::from_millis(1000),
            transport_base_delay: Duration::from_millis(800),
            backoff_multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that performs exactly one attempt.
    pub fn no_retry() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Set maximum attempts
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the base delay of the rate-limit track
    pub const fn with_rate_limit_base_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_base_delay = delay;
        self
    }

    /// Set the base delay of the transport-failure track
    pub const fn with_transport_base_delay(mut self, delay: Duration) -> Self {
        self.transport_base_delay = delay;
        self
    }

    /// Effective attempt budget; a zero budget still performs one attempt.
    pub const fn attempt_budget(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }

    /// Whether `attempt` (0-based) is the last one the budget allows.
    pub const fn is_last_attempt(&self, attempt: u32) -> bool {
        attempt + 1 >= self.attempt_budget()
    }

    pub const fn base_delay(&self, track: BackoffTrack) -> Duration {
        match track {
            BackoffTrack::RateLimit => self.rate_limit_base_delay,
            BackoffTrack::Transport => self.transport_base_delay,
        }
    }

    /// Delay before the retry following attempt `retry_index` (0-based):
    /// `base * multiplier^retry_index`, saturating on overflow.
    pub fn calculate_delay(&self, track: BackoffTrack, retry_index: u32) -> Duration {
        let factor = self.backoff_multiplier.saturating_pow(retry_index);
        self.base_delay(track).saturating_mul(factor)
    }
}
