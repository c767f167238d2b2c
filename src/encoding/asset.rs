use std::path::Path;

use bytes::Bytes;

use crate::error::AnalysisError;
use crate::utils::mime::guess_mime;

/// An opaque byte sequence plus its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAsset {
    bytes: Bytes,
    media_type: String,
}

impl BinaryAsset {
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    /// Build an asset whose media type is sniffed from its magic bytes.
    ///
    /// Leaves the media type empty when the bytes are not recognised;
    /// encoding such an asset fails with `AssetUnreadable`.
    pub fn sniffed(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let media_type = guess_mime(Some(&bytes), None).unwrap_or_default();
        Self { bytes, media_type }
    }

    /// Read an asset from disk.
    ///
    /// The media type is sniffed from the content and falls back to the file
    /// extension. I/O failures surface as `AnalysisError::AssetUnreadable`.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AnalysisError::AssetUnreadable(format!("failed to read {}: {e}", path.display()))
        })?;
        let media_type = guess_mime(Some(&bytes), path.to_str()).unwrap_or_default();
        tracing::debug!(
            target: "imgscope::encoding",
            path = %path.display(),
            size = bytes.len(),
            media_type = %media_type,
            "loaded asset"
        );
        Ok(Self::new(bytes, media_type))
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
