//! HTTP Headers Utility

use crate::error::AnalysisError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::collections::HashMap;

/// Header carrying the API key for generateContent endpoints.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add the API key header. The value is marked sensitive.
    pub fn with_api_key(mut self, api_key: &str) -> Result<Self, AnalysisError> {
        let mut value = HeaderValue::from_str(api_key).map_err(|e| {
            AnalysisError::ConfigurationError(format!("Invalid API key format: {e}"))
        })?;
        value.set_sensitive(true);
        self.headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add user agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, AnalysisError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| {
                AnalysisError::ConfigurationError(format!("Invalid user agent: {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, AnalysisError> {
        for (key, value) in custom_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                AnalysisError::ConfigurationError(format!("Invalid header name '{key}': {e}"))
            })?;
            self.headers.insert(
                header_name,
                HeaderValue::from_str(value).map_err(|e| {
                    AnalysisError::ConfigurationError(format!(
                        "Invalid value for header '{key}': {e}"
                    ))
                })?,
            );
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
