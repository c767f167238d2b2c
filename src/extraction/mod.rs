//! Response extraction
//!
//! Turns a successful response body into an `AnalysisResult`. A body that does
//! not carry text at the fixed result path is a `MalformedResponse`, which is
//! never reported as a transport or status failure.

mod json_path;

pub use json_path::get_path;

use crate::error::AnalysisError;
use crate::types::AnalysisResult;

/// Location of the analysis text in a generateContent response.
pub const RESULT_TEXT_PATH: &str = "candidates[0].content.parts[0].text";

/// Decode a success body as JSON.
pub fn decode_response_body(body: &[u8]) -> Result<serde_json::Value, AnalysisError> {
    serde_json::from_slice(body)
        .map_err(|e| AnalysisError::MalformedResponse(format!("response is not valid JSON: {e}")))
}

/// Extract the analysis text from a decoded response.
pub fn extract_analysis(body: &serde_json::Value) -> Result<AnalysisResult, AnalysisError> {
    let text = match get_path(body, RESULT_TEXT_PATH) {
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(serde_json::Value::String(_)) => {
            return Err(AnalysisError::MalformedResponse(format!(
                "`{RESULT_TEXT_PATH}` is empty"
            )));
        }
        Some(other) => {
            return Err(AnalysisError::MalformedResponse(format!(
                "`{RESULT_TEXT_PATH}` is not text (found {})",
                json_type_name(other)
            )));
        }
        None => return Err(missing_text(body)),
    };

    Ok(AnalysisResult {
        text,
        finish_reason: get_str(body, "candidates[0].finishReason"),
        model_version: get_str(body, "modelVersion"),
    })
}

/// Decode and extract in one step.
pub fn extract_from_bytes(body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    extract_analysis(&decode_response_body(body)?)
}

fn missing_text(body: &serde_json::Value) -> AnalysisError {
    if let Some(reason) = get_str(body, "promptFeedback.blockReason") {
        return AnalysisError::MalformedResponse(format!(
            "no analysis returned; prompt blocked ({reason})"
        ));
    }
    if let Some(reason) = get_str(body, "candidates[0].finishReason") {
        return AnalysisError::MalformedResponse(format!(
            "`{RESULT_TEXT_PATH}` missing (finish reason {reason})"
        ));
    }
    AnalysisError::MalformedResponse(format!("`{RESULT_TEXT_PATH}` missing"))
}

fn get_str(body: &serde_json::Value, path: &str) -> Option<String> {
    get_path(body, path)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
