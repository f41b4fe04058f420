//! Decoding raw HTTP responses into JSON bodies

use gttx_domain::{GttxError, Result};
use reqwest::Response;
use serde_json::Value;

use crate::errors::InfraError;

/// Read a response body as JSON.
///
/// A non-2xx status is surfaced as `HttpStatus` without looking inside the
/// body; the provider reports its own failures with a 2xx envelope.
pub async fn decode_body(response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await.map_err(InfraError::from)?;

    if !status.is_success() {
        return Err(GttxError::HttpStatus { status: status.as_u16(), body: text });
    }

    serde_json::from_str(&text).map_err(|e| {
        GttxError::InvalidResponse(format!("response body is not valid JSON ({e}): {}", truncate(&text)))
    })
}

fn truncate(text: &str) -> &str {
    const LIMIT: usize = 256;
    match text.char_indices().nth(LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn respond_with(template: ResponseTemplate) -> Response {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(template).mount(&server).await;
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap()
    }

    #[tokio::test]
    async fn decodes_json_body() {
        let response =
            respond_with(ResponseTemplate::new(200).set_body_string(r#"{"apiStatus":0}"#)).await;
        assert_eq!(decode_body(response).await.unwrap(), serde_json::json!({ "apiStatus": 0 }));
    }

    #[tokio::test]
    async fn non_success_status_is_http_status_error() {
        let response = respond_with(ResponseTemplate::new(502).set_body_string("bad gateway")).await;
        assert_eq!(
            decode_body(response).await.unwrap_err(),
            GttxError::HttpStatus { status: 502, body: "bad gateway".into() }
        );
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_response() {
        let response = respond_with(ResponseTemplate::new(200).set_body_string("<html>")).await;
        assert!(matches!(decode_body(response).await, Err(GttxError::InvalidResponse(_))));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate(&long).chars().count(), 256);
        assert_eq!(truncate("short"), "short");
    }
}
