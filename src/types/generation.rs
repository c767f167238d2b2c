//! generateContent wire types

use serde::{Deserialize, Serialize};

use crate::encoding::EncodedPayload;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user turn carrying the instruction followed by the image.
    pub fn for_image(instruction: impl Into<String>, payload: EncodedPayload) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::Text {
                        text: instruction.into(),
                    },
                    Part::InlineData {
                        inline_data: payload,
                    },
                ],
            }],
            generation_config: None,
        }
    }

    pub fn with_generation_config(mut self, config: Option<GenerationConfig>) -> Self {
        self.generation_config = config;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// A content part. Serialized untagged: `{"text": ..}` or `{"inlineData": ..}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: EncodedPayload,
    },
}

/// Optional sampling configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub const fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub const fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    pub fn with_response_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.response_mime_type = Some(mime.into());
        self
    }
}

/// The analysis text extracted from a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub text: String,
    /// `candidates[0].finishReason`, when reported
    pub finish_reason: Option<String>,
    /// `modelVersion`, when reported
    pub model_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_request_wire_shape() {
        let payload = EncodedPayload {
            mime_type: "image/png".into(),
            data: "AAEC".into(),
        };
        let req = GenerateContentRequest::for_image("describe", payload).with_generation_config(
            Some(GenerationConfig::new().with_temperature(0.5).with_max_output_tokens(256)),
        );

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "describe" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAEC" } }
                    ]
                }],
                "generationConfig": { "temperature": 0.5, "maxOutputTokens": 256 }
            })
        );
    }

    #[test]
    fn generation_config_is_omitted_when_absent() {
        let payload = EncodedPayload {
            mime_type: "image/jpeg".into(),
            data: "AA==".into(),
        };
        let value = serde_json::to_value(GenerateContentRequest::for_image("x", payload)).unwrap();
        assert!(value.get("generationConfig").is_none());
    }
}
