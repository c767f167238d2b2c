use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::BinaryAsset;
use crate::error::AnalysisError;

/// Base64 text of an asset's bytes paired with its media type.
///
/// Serializes as the inline-data blob of a content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPayload {
    pub mime_type: String,
    pub data: String,
}

impl EncodedPayload {
    /// Decode back into the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>, AnalysisError> {
        Ok(STANDARD.decode(&self.data)?)
    }

    /// Render as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Encode an asset into a transport-safe payload.
///
/// Encoding runs on the blocking pool since it is CPU-bound for large images.
/// Assets without a media type are rejected as `AssetUnreadable`. Empty byte
/// sequences encode to an empty payload.
pub async fn encode_asset(asset: &BinaryAsset) -> Result<EncodedPayload, AnalysisError> {
    let mime_type = asset.media_type().trim();
    if mime_type.is_empty() {
        return Err(AnalysisError::AssetUnreadable(
            "unable to determine media type".to_string(),
        ));
    }
    let mime_type = mime_type.to_string();

    let bytes = asset.bytes().clone();
    let data = tokio::task::spawn_blocking(move || STANDARD.encode(&bytes))
        .await
        .map_err(|e| AnalysisError::AssetUnreadable(format!("encoding task failed: {e}")))?;

    tracing::trace!(
        target: "imgscope::encoding",
        media_type = %mime_type,
        raw_len = asset.len(),
        encoded_len = data.len(),
        "encoded asset"
    );

    Ok(EncodedPayload { mime_type, data })
}
