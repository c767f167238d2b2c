//! Client configuration

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::AnalysisError;
use crate::execution::http::HttpHeaderBuilder;
use crate::retry::RetryPolicy;
use crate::types::GenerationConfig;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for an `ImageAnalyzer`
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Base URL of the inference API
    pub base_url: String,
    /// Model used for analysis
    pub model: String,
    /// Optional API key, sent as `x-goog-api-key`
    pub api_key: Option<SecretString>,
    /// Overall per-attempt HTTP timeout
    pub timeout: Option<Duration>,
    /// Attempt budget and backoff tracks
    pub retry: RetryPolicy,
    /// Default sampling configuration
    pub generation_config: Option<GenerationConfig>,
    pub user_agent: Option<String>,
    pub custom_headers: HashMap<String, String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Some(Duration::from_secs(30)),
            retry: RetryPolicy::default(),
            generation_config: None,
            user_agent: None,
            custom_headers: HashMap::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from environment variables.
    ///
    /// Supported variables:
    /// - `GEMINI_API_KEY`
    /// - `IMGSCOPE_BASE_URL`, `IMGSCOPE_MODEL`
    /// - `IMGSCOPE_TIMEOUT_SECS`
    /// - `IMGSCOPE_MAX_ATTEMPTS`
    /// - `IMGSCOPE_TRANSPORT_BASE_DELAY_MS`, `IMGSCOPE_RATE_LIMIT_BASE_DELAY_MS`
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.is_empty()) {
            config.api_key = Some(SecretString::from(key));
        }
        if let Some(url) = lookup("IMGSCOPE_BASE_URL") {
            config.base_url = url;
        }
        if let Some(model) = lookup("IMGSCOPE_MODEL") {
            config.model = model;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "IMGSCOPE_TIMEOUT_SECS")? {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(attempts) = parse_var::<u32, _>(&lookup, "IMGSCOPE_MAX_ATTEMPTS")? {
            config.retry.max_attempts = attempts;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "IMGSCOPE_TRANSPORT_BASE_DELAY_MS")? {
            config.retry.transport_base_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "IMGSCOPE_RATE_LIMIT_BASE_DELAY_MS")? {
            config.retry.rate_limit_base_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }

    /// `{base_url}/models/{model}:generateContent`
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let model = self.model.trim_start_matches("models/");
        format!("{base}/models/{model}:generateContent")
    }

    /// Headers sent with every attempt.
    pub fn build_headers(&self) -> Result<reqwest::header::HeaderMap, AnalysisError> {
        let mut builder = HttpHeaderBuilder::new()
            .with_json_content_type()
            .with_custom_headers(&self.custom_headers)?;
        if let Some(ua) = &self.user_agent {
            builder = builder.with_user_agent(ua)?;
        }
        if let Some(key) = &self.api_key {
            builder = builder.with_api_key(key.expose_secret())?;
        }
        Ok(builder.build())
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.base_url.trim().is_empty() {
            return Err(AnalysisError::ConfigurationError(
                "base_url must not be empty".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(AnalysisError::ConfigurationError(
                "model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AnalysisError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            AnalysisError::ConfigurationError(format!("Invalid value for {key} ('{raw}'): {e}"))
        }),
    }
}
