//! End-to-end behavior of the authenticated request pipeline against a mock
//! provider.

mod support;

use std::time::Duration;

use futures::future::join_all;
use gttx_domain::constants::AUTHORIZE_PATH;
use gttx_domain::{
    AttackQuery, ClientConfig, Credentials, GttxError, OrderRef, OrderRenewal, Protocol,
};
use gttx_infra::{GttxClient, MockClock, RequestSpec};
use serde_json::json;
use support::{
    client_with_clock, config_for, hits, mount_authorize, provider_failure, success, APP_ID,
    SECRET_KEY,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORDERS: &str = "/xddos/order/list";

fn orders() -> RequestSpec {
    RequestSpec::get(ORDERS).authenticated()
}

#[tokio::test]
async fn valid_cached_token_skips_authorization() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .and(header("Authorization", "tok-1"))
        .respond_with(success(json!({ "apiStatus": 0, "result": [] })))
        .expect(3)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 0), &clock);

    for _ in 0..3 {
        client.send(orders()).await.unwrap();
        clock.advance_secs(60);
    }
}

#[tokio::test]
async fn authorization_sends_credentials_as_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AUTHORIZE_PATH))
        .and(query_param("appId", APP_ID))
        .and(query_param("secretKey", SECRET_KEY))
        .respond_with(success(json!({ "apiStatus": 0, "Authorization": "tok-q" })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 0), &clock);
    assert_eq!(client.authorize().await.unwrap(), "tok-q");
}

#[tokio::test]
async fn expired_session_triggers_exactly_one_reauthorization() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 2).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(success(json!({ "apiStatus": 0 })))
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 0), &clock);

    client.send(orders()).await.unwrap();
    clock.advance_secs(1500);
    client.send(orders()).await.unwrap();
    client.send(orders()).await.unwrap();
}

#[tokio::test]
async fn retry_then_success_returns_payload() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(provider_failure("4", "authorization expired"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(success(json!({ "foo": "bar" })))
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 1), &clock);

    let payload = client.send(orders()).await.unwrap();
    assert_eq!(payload, json!({ "foo": "bar" }));
    assert_eq!(hits(&server, ORDERS).await, 2);
    assert_eq!(hits(&server, AUTHORIZE_PATH).await, 1);
}

#[tokio::test]
async fn code_four_is_retried_until_budget_is_spent() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(provider_failure("4", "authorization expired"))
        .expect(3)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 2), &clock);

    let err = client.send(orders()).await.unwrap_err();
    assert_eq!(
        err,
        GttxError::AuthorizationExpired { code: 4, message: "authorization expired".into() }
    );
}

#[tokio::test]
async fn other_codes_are_never_retried() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(provider_failure("7", "invalid parameter"))
        .expect(1)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 5), &clock);

    let err = client.send(orders()).await.unwrap_err();
    assert_eq!(err, GttxError::ProviderRejected { code: 7, message: "invalid parameter".into() });
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn zero_retry_budget_surfaces_first_rejection() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(provider_failure("4", "expired"))
        .expect(1)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 0), &clock);

    let err = client.send(orders()).await.unwrap_err();
    assert_eq!(err.code(), Some(4));
}

#[tokio::test]
async fn invalidating_rejected_token_forces_fresh_authorization() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 2).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(provider_failure("4", "expired"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(success(json!({ "foo": "bar" })))
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let config = ClientConfig { invalidate_rejected_token: true, ..config_for(&server, 1) };
    let client = client_with_clock(&server, config, &clock);

    assert_eq!(client.send(orders()).await.unwrap(), json!({ "foo": "bar" }));
}

#[tokio::test]
async fn rejected_credentials_fail_without_touching_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AUTHORIZE_PATH))
        .respond_with(provider_failure("4", "invalid appId"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(success(json!({ "apiStatus": 0 })))
        .expect(0)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 3), &clock);

    let err = client.send(orders()).await.unwrap_err();
    assert!(matches!(err, GttxError::AuthorizationFailed { code: 4, .. }));
}

#[tokio::test]
async fn concurrent_requests_share_one_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AUTHORIZE_PATH))
        .respond_with(
            success(json!({ "apiStatus": 0, "Authorization": "shared" }))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .and(header("Authorization", "shared"))
        .respond_with(success(json!({ "apiStatus": 0 })))
        .expect(8)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 0), &clock);

    let results = join_all((0..8).map(|_| client.send(orders()))).await;
    assert!(results.iter().all(Result::is_ok));
}

#[tokio::test]
async fn concurrent_requests_share_one_failed_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AUTHORIZE_PATH))
        .respond_with(
            provider_failure("2", "unknown appId").set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(success(json!({ "apiStatus": 0 })))
        .expect(0)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 2), &clock);

    let results = join_all((0..8).map(|_| client.send(orders()))).await;
    for result in results {
        assert!(
            matches!(result, Err(GttxError::AuthorizationFailed { code: 2, .. })),
            "{result:?}"
        );
    }
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 2), &clock);

    let err = client.send(orders()).await.unwrap_err();
    assert_eq!(err, GttxError::HttpStatus { status: 503, body: "maintenance".into() });
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let config = ClientConfig {
        host: "127.0.0.1:9".into(),
        protocol: Protocol::Http,
        timeout_secs: 2,
        ..ClientConfig::default()
    };
    let client = GttxClient::new(Credentials::new(APP_ID, SECRET_KEY), config).unwrap();

    let err = client.send(orders()).await.unwrap_err();
    assert!(matches!(err, GttxError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn timed_out_renewal_is_not_resent() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 1).await;
    Mock::given(method("POST"))
        .and(path("/xddos/order/renew"))
        .respond_with(success(json!({ "apiStatus": 0 })).set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let config = ClientConfig { timeout_secs: 1, ..config_for(&server, 3) };
    let client = client_with_clock(&server, config, &clock);

    let err = client
        .renew_order(&OrderRenewal { order_id: "ord-7".into(), months: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, GttxError::Transport(_)), "{err:?}");
    assert_eq!(hits(&server, "/xddos/order/renew").await, 1);
}

#[tokio::test]
async fn resource_methods_run_through_the_pipeline() {
    let server = MockServer::start().await;
    mount_authorize(&server, "tok", 1).await;
    Mock::given(method("GET"))
        .and(path("/xddos/attack/list"))
        .and(header("Authorization", "tok"))
        .and(query_param("ip", "192.0.2.10"))
        .respond_with(success(json!({ "apiStatus": 0, "result": { "list": [] } })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/xddos/order/ip"))
        .and(query_param("orderId", "ord-7"))
        .respond_with(success(json!({ "apiStatus": 0, "result": ["192.0.2.10"] })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = MockClock::new();
    let client = client_with_clock(&server, config_for(&server, 0), &clock);

    let attacks = client
        .list_attacks(&AttackQuery { ip: Some("192.0.2.10".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(attacks["result"]["list"], json!([]));

    let ips = client.list_order_ips(&OrderRef { order_id: "ord-7".into() }).await.unwrap();
    assert_eq!(ips["result"][0], "192.0.2.10");
}
