//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use gttx_domain::constants::AUTHORIZE_PATH;
use gttx_domain::{ClientConfig, Credentials, Protocol};
use gttx_infra::{GttxClient, MockClock};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APP_ID: &str = "app-integration";
pub const SECRET_KEY: &str = "secret-integration";

/// Client settings pointing at a wiremock server over plain HTTP
pub fn config_for(server: &MockServer, unauthorized_retry: u32) -> ClientConfig {
    ClientConfig {
        host: server.address().to_string(),
        protocol: Protocol::Http,
        unauthorized_retry,
        ..ClientConfig::default()
    }
}

pub fn client_with_clock(server: &MockServer, config: ClientConfig, clock: &MockClock) -> GttxClient {
    GttxClient::builder(Credentials::new(APP_ID, SECRET_KEY))
        .config(config)
        .clock(Arc::new(clock.clone()))
        .build()
        .expect("client should build against mock server")
}

pub fn success(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn provider_failure(code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "apiStatus": 1,
        "result": { "error_code": code, "error_en": message }
    }))
}

/// Mount an authorization endpoint that always issues `token`.
///
/// `expected` is verified when the server drops.
pub async fn mount_authorize(server: &MockServer, token: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path(AUTHORIZE_PATH))
        .respond_with(success(json!({ "apiStatus": 0, "Authorization": token })))
        .expect(expected)
        .mount(server)
        .await;
}

/// Number of requests the server received for `route`
pub async fn hits(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}
