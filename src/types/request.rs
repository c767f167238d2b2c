use reqwest::Method;
use reqwest::header::HeaderMap;

/// A fully assembled HTTP request, built fresh for every logical call.
///
/// The executor treats `body` as opaque and re-sends it unchanged on retry.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RequestSpec {
    /// A JSON `POST` to `url`.
    pub fn post_json(url: impl Into<String>, headers: HeaderMap, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            method: Method::POST,
            headers,
            body,
        }
    }
}
