//! High-level image analysis client
//!
//! Each call runs the full pipeline sequentially: encode the asset, build a
//! fresh request, execute it with retries, then extract the analysis text.

use std::path::Path;
use std::sync::Arc;

use crate::config::AnalyzerConfig;
use crate::encoding::{BinaryAsset, EncodedPayload, encode_asset};
use crate::error::AnalysisError;
use crate::execution::ResilientExecutor;
use crate::execution::http::HttpTransport;
use crate::extraction::extract_from_bytes;
use crate::retry::Sleeper;
use crate::types::{AnalysisResult, GenerateContentRequest, RequestSpec};
use crate::utils::mime::is_image_mime;

/// Submits images for analysis.
///
/// Holds only immutable configuration and a stateless executor, so it can be
/// shared across tasks; concurrent calls never share attempt counters.
#[derive(Debug, Clone)]
pub struct ImageAnalyzer {
    config: AnalyzerConfig,
    executor: ResilientExecutor,
}

impl ImageAnalyzer {
    /// Create an analyzer backed by `reqwest`.
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let executor = ResilientExecutor::with_reqwest(config.timeout)?;
        Ok(Self { config, executor })
    }

    /// Create an analyzer from environment variables.
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::new(AnalyzerConfig::from_env()?)
    }

    /// Create an analyzer over a custom transport.
    pub fn with_transport(
        config: AnalyzerConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            config,
            executor: ResilientExecutor::new(transport),
        })
    }

    /// Replace the sleeper used between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.executor = self.executor.with_sleeper(sleeper);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Assemble the request for an encoded image and instruction.
    pub fn build_request(
        &self,
        payload: EncodedPayload,
        instruction: &str,
    ) -> Result<RequestSpec, AnalysisError> {
        let body = GenerateContentRequest::for_image(instruction, payload)
            .with_generation_config(self.config.generation_config.clone());
        Ok(RequestSpec::post_json(
            self.config.endpoint_url(),
            self.config.build_headers()?,
            serde_json::to_value(&body)?,
        ))
    }

    /// Analyze an in-memory asset.
    pub async fn analyze(
        &self,
        asset: &BinaryAsset,
        instruction: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        if !is_image_mime(asset.media_type()) {
            tracing::warn!(
                target: "imgscope::client",
                media_type = %asset.media_type(),
                "asset does not declare an image media type"
            );
        }

        let payload = encode_asset(asset).await?;
        let request = self.build_request(payload, instruction)?;
        let body = self.executor.execute(&request, &self.config.retry).await?;
        let result = extract_from_bytes(&body)?;

        tracing::debug!(
            target: "imgscope::client",
            model = %self.config.model,
            chars = result.text.len(),
            finish_reason = result.finish_reason.as_deref().unwrap_or("unknown"),
            "analysis complete"
        );
        Ok(result)
    }

    /// Load an asset from disk, then analyze it.
    pub async fn analyze_file(
        &self,
        path: impl AsRef<Path>,
        instruction: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let asset = BinaryAsset::from_path(path).await?;
        self.analyze(&asset, instruction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::execution::http::HttpTransportResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicU32,
    }

    #[async_trait]
    impl HttpTransport for CountingTransport {
        async fn execute_json(
            &self,
            _request: &RequestSpec,
        ) -> Result<HttpTransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::connect("unreachable"))
        }
    }

    #[tokio::test]
    async fn request_targets_endpoint_with_inline_image() {
        let analyzer = ImageAnalyzer::with_transport(
            AnalyzerConfig::new()
                .with_base_url("https://example.invalid/v1beta")
                .with_model("gemini-test")
                .with_api_key("k"),
            Arc::new(CountingTransport::default()),
        )
        .unwrap();

        let payload = encode_asset(&BinaryAsset::new(b"img".to_vec(), "image/png"))
            .await
            .unwrap();
        let req = analyzer.build_request(payload, "Describe").unwrap();

        assert_eq!(req.method, reqwest::Method::POST);
        assert_eq!(
            req.url,
            "https://example.invalid/v1beta/models/gemini-test:generateContent"
        );
        assert_eq!(req.headers.get("x-goog-api-key").unwrap(), "k");
        assert_eq!(
            req.body.pointer("/contents/0/parts/1/inlineData/data"),
            Some(&serde_json::json!("aW1n"))
        );
        assert_eq!(
            req.body.pointer("/contents/0/parts/0/text"),
            Some(&serde_json::json!("Describe"))
        );
    }

    #[tokio::test]
    async fn unreadable_asset_fails_before_any_network_call() {
        let transport = Arc::new(CountingTransport::default());
        let analyzer =
            ImageAnalyzer::with_transport(AnalyzerConfig::new(), transport.clone()).unwrap();

        let err = analyzer
            .analyze(&BinaryAsset::new(b"img".to_vec(), " "), "x")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::AssetUnreadable(_)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rejects_invalid_config() {
        let err = ImageAnalyzer::with_transport(
            AnalyzerConfig::new().with_base_url(""),
            Arc::new(CountingTransport::default()),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigurationError(_)));
    }
}
