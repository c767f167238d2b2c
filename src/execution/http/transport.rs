//! HTTP transport abstraction.
//!
//! The executor issues every attempt through an injectable transport so the
//! retry contract can be exercised with scripted outcomes instead of a real
//! network. `ReqwestTransport` is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::{AnalysisError, TransportError};
use crate::types::RequestSpec;

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends one attempt of a request.
///
/// Any response, whatever its status, is `Ok`; `Err` means no response was
/// obtained at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute_json(
        &self,
        request: &RequestSpec,
    ) -> Result<HttpTransportResponse, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with an optional overall request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AnalysisError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute_json(
        &self,
        request: &RequestSpec,
    ) -> Result<HttpTransportResponse, TransportError> {
        let resp = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone())
            .json(&request.body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?.to_vec();

        Ok(HttpTransportResponse {
            status,
            headers,
            body,
        })
    }
}
