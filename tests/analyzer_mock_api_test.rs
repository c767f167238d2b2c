//! Mock API tests for the image analyzer
//!
//! These tests use wiremock to drive the full pipeline (encode, execute with
//! retries, extract) over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use imgscope::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";
const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];

fn generate_content_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 270,
            "candidatesTokenCount": 42,
            "totalTokenCount": 312
        },
        "modelVersion": MODEL
    })
}

fn analyzer(server: &MockServer, sleeper: &RecordingSleeper) -> ImageAnalyzer {
    let config = AnalyzerConfig::new()
        .with_base_url(format!("{}/v1beta", server.uri()))
        .with_model(MODEL)
        .with_api_key("test-api-key")
        .with_timeout(Duration::from_secs(5));
    ImageAnalyzer::new(config)
        .expect("analyzer")
        .with_sleeper(Arc::new(sleeper.clone()))
}

fn png() -> BinaryAsset {
    BinaryAsset::new(PNG_BYTES.to_vec(), "image/png")
}

#[tokio::test]
async fn analyze_sends_inline_image_and_returns_text() {
    let server = MockServer::start().await;
    let encoded = encode_asset(&png()).await.expect("encode");

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [
                    { "text": "Describe in English and Spanish" },
                    { "inlineData": { "mimeType": "image/png", "data": encoded.data } }
                ]
            }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(generate_content_response("EN: a cat. ES: un gato.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::new();
    let result = analyzer(&server, &sleeper)
        .analyze(&png(), "Describe in English and Spanish")
        .await
        .expect("analysis");

    assert_eq!(result.text, "EN: a cat. ES: un gato.");
    assert_eq!(result.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(result.model_version.as_deref(), Some(MODEL));
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn rate_limited_requests_are_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED" }
        })))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_content_response("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::new();
    let result = analyzer(&server, &sleeper)
        .analyze(&png(), "Describe")
        .await
        .expect("analysis");

    assert_eq!(result.text, "ok");
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(1000), Duration::from_millis(2000)]
    );
}

#[tokio::test]
async fn persistent_rate_limit_surfaces_status_429() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource exhausted" }
        })))
        .expect(4)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::new();
    let err = analyzer(&server, &sleeper)
        .analyze(&png(), "Describe")
        .await
        .expect_err("should fail");

    assert_eq!(err.status_code(), Some(429));
    assert!(err.is_unanswered());
    assert_eq!(sleeper.delays().len(), 3);
}

#[tokio::test]
async fn forbidden_fails_once_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::new();
    let err = analyzer(&server, &sleeper)
        .analyze(&png(), "Describe")
        .await
        .expect_err("should fail");

    assert_eq!(err.status_code(), Some(403));
    assert_eq!(summarize_error(&err).kind, FailureKind::Unanswered);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn service_unavailable_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::new();
    let err = analyzer(&server, &sleeper)
        .analyze(&png(), "Describe")
        .await
        .expect_err("should fail");

    match err {
        AnalysisError::HttpStatus {
            status, message, ..
        } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn success_without_text_is_malformed_not_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::new();
    let err = analyzer(&server, &sleeper)
        .analyze(&png(), "Describe")
        .await
        .expect_err("should fail");

    assert!(err.is_malformed_response());
    assert!(!err.is_unanswered());
    assert_eq!(summarize_error(&err).kind, FailureKind::MalformedAnswer);
    assert_ne!(
        user_message(&err),
        user_message(&AnalysisError::http_status(500, "x"))
    );
}

#[tokio::test]
async fn unreachable_endpoint_retries_on_transport_track() {
    // Bind and drop a listener so the port refuses connections.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };

    let sleeper = RecordingSleeper::new();
    let analyzer = ImageAnalyzer::new(
        AnalyzerConfig::new()
            .with_base_url(format!("http://{addr}/v1beta"))
            .with_model(MODEL)
            .with_retry_policy(RetryPolicy::new().with_max_attempts(3)),
    )
    .expect("analyzer")
    .with_sleeper(Arc::new(sleeper.clone()));

    let err = analyzer
        .analyze(&png(), "Describe")
        .await
        .expect_err("should fail");

    assert!(matches!(err, AnalysisError::Transport(_)));
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(800), Duration::from_millis(1600)]
    );
}

#[tokio::test]
async fn analyze_file_reads_asset_from_disk() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{}, { "inlineData": { "mimeType": "image/png" } }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_content_response("file")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("upload.bin");
    std::fs::write(&file, PNG_BYTES).expect("write");

    let sleeper = RecordingSleeper::new();
    let result = analyzer(&server, &sleeper)
        .analyze_file(&file, "Describe")
        .await
        .expect("analysis");

    assert_eq!(result.text, "file");
}

#[tokio::test]
async fn one_analyzer_serves_concurrent_calls_independently() {
    let server = MockServer::start().await;

    let instruction = |text: &str| {
        body_partial_json(json!({ "contents": [{ "parts": [{ "text": text }] }] }))
    };
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(instruction("Describe the first image"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(instruction("Describe the first image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_content_response("first")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(instruction("Describe the second image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_content_response("second")))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::new();
    let analyzer = analyzer(&server, &sleeper);
    let asset = png();

    let (first, second) = tokio::join!(
        analyzer.analyze(&asset, "Describe the first image"),
        analyzer.analyze(&asset, "Describe the second image")
    );

    assert_eq!(first.expect("first analysis").text, "first");
    assert_eq!(second.expect("second analysis").text, "second");

    let requests = server.received_requests().await.expect("recording enabled");
    let sent_with = |text: &str| {
        requests
            .iter()
            .filter(|r| String::from_utf8_lossy(&r.body).contains(text))
            .count()
    };
    assert_eq!(sent_with("Describe the first image"), 3);
    assert_eq!(sent_with("Describe the second image"), 1);
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(1000), Duration::from_millis(2000)]
    );
}
