//! End-to-end tests of the portal login flow against a mock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xfusage_core::{Credentials, SensorEntity, UsageSensor, UsageSnapshot, UsageSource};
use xfusage_fetch::{PortalEndpoints, XfinityUsageFetcher};

const REQ_ID: &str = "tok-123";
const SESSION_COOKIE: &str = "session=abc123";

fn login_page(req_id: &str) -> String {
    format!(
        r#"<html><body><form action="/login" method="post">
<input type="hidden" name="reqId" value="{req_id}">
<input type="text" name="user">
</form></body></html>"#
    )
}

fn usage_body(home: f64, allowed: f64) -> serde_json::Value {
    json!({
        "usageMonths": [
            {"unitOfMeasure": "GB", "homeUsage": 10, "allowableUsage": 1024, "startDate": "09/01/2026", "endDate": "09/30/2026"},
            {"unitOfMeasure": "GB", "homeUsage": home, "allowableUsage": allowed, "startDate": "10/01/2026", "endDate": "10/31/2026"}
        ]
    })
}

fn fetcher_for(server: &MockServer) -> XfinityUsageFetcher {
    XfinityUsageFetcher::with_endpoints(
        Credentials::new("alice", "s3cret"),
        PortalEndpoints::with_base_url(&server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

async fn mount_bootstrap(server: &MockServer, status: u16, html: String) {
    Mock::given(method("GET"))
        .and(path("/oauth/force_connect/"))
        .respond_with(ResponseTemplate::new(status).set_body_string(html))
        .mount(server)
        .await;
}

async fn mount_login(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains(format!("reqId={REQ_ID}")))
        .and(body_string_contains("user=alice"))
        .and(body_string_contains("passwd=s3cret"))
        .and(body_string_contains("client_id=my-account-web"))
        .respond_with(
            ResponseTemplate::new(status).insert_header("set-cookie", "session=abc123; Path=/"),
        )
        .mount(server)
        .await;
}

async fn mount_usage(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/apis/services/internet/usage"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_happy_path(server: &MockServer, home: f64, allowed: f64) {
    mount_bootstrap(server, 200, login_page(REQ_ID)).await;
    mount_login(server, 200).await;
    mount_usage(server, 200, usage_body(home, allowed)).await;
}

/// Returns a fetcher that already holds a successful snapshot of 250/1024 GB,
/// with all mocks cleared.
async fn primed_fetcher(server: &MockServer) -> (XfinityUsageFetcher, UsageSnapshot) {
    mount_happy_path(server, 250.0, 1024.0).await;
    let mut fetcher = fetcher_for(server);
    fetcher.refresh().await;
    let snapshot = fetcher.snapshot().cloned().expect("priming refresh succeeds");
    server.reset().await;
    (fetcher, snapshot)
}

#[tokio::test]
async fn successful_refresh_populates_snapshot() {
    let server = MockServer::start().await;
    mount_happy_path(&server, 250.0, 1024.0).await;

    let mut fetcher = fetcher_for(&server);
    fetcher.refresh().await;

    let snapshot = fetcher.snapshot().expect("snapshot set");
    assert_eq!(snapshot.total_usage, 250.0);
    assert_eq!(snapshot.allowed_usage, 1024.0);
    assert_eq!(snapshot.remaining_usage, 774.0);
    assert_eq!(snapshot.unit, "GB");
    assert_eq!(snapshot.start_date.as_deref(), Some("10/01/2026"));
    assert!(fetcher.last_error().is_none());
    assert!(fetcher.last_attempt().is_some());
}

#[tokio::test]
async fn fetch_snapshot_does_not_store() {
    let server = MockServer::start().await;
    mount_happy_path(&server, 300.0, 1024.0).await;

    let fetcher = fetcher_for(&server);
    let snapshot = fetcher.fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.total_usage, 300.0);
    assert!(fetcher.snapshot().is_none());
}

#[tokio::test]
async fn over_allowance_yields_negative_remaining() {
    let server = MockServer::start().await;
    mount_happy_path(&server, 1100.0, 1024.0).await;

    let mut fetcher = fetcher_for(&server);
    fetcher.refresh().await;

    assert_eq!(fetcher.snapshot().unwrap().remaining_usage, -76.0);
}

#[tokio::test]
async fn second_refresh_replaces_snapshot() {
    let server = MockServer::start().await;
    let (mut fetcher, first) = primed_fetcher(&server).await;
    assert_eq!(first.total_usage, 250.0);

    mount_happy_path(&server, 400.0, 1229.0).await;
    fetcher.refresh().await;

    let snapshot = fetcher.snapshot().unwrap();
    assert_eq!(snapshot.total_usage, 400.0);
    assert_eq!(snapshot.allowed_usage, 1229.0);
    assert_eq!(snapshot.remaining_usage, 829.0);
}

#[tokio::test]
async fn bootstrap_failure_aborts_and_keeps_snapshot() {
    let server = MockServer::start().await;
    let (mut fetcher, before) = primed_fetcher(&server).await;

    mount_bootstrap(&server, 503, String::new()).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    fetcher.refresh().await;

    assert_eq!(fetcher.snapshot(), Some(&before));
    assert!(fetcher.last_error().unwrap().contains("Failed to find reqId"));
    server.verify().await;
}

#[tokio::test]
async fn login_failure_aborts_and_keeps_snapshot() {
    let server = MockServer::start().await;
    let (mut fetcher, before) = primed_fetcher(&server).await;

    mount_bootstrap(&server, 200, login_page(REQ_ID)).await;
    mount_login(&server, 401).await;
    Mock::given(method("GET"))
        .and(path("/apis/services/internet/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(usage_body(999.0, 1024.0)))
        .expect(0)
        .mount(&server)
        .await;

    fetcher.refresh().await;

    assert_eq!(fetcher.snapshot(), Some(&before));
    assert!(fetcher.last_error().unwrap().contains("Failed to login"));
    server.verify().await;
}

#[tokio::test]
async fn usage_failure_keeps_snapshot() {
    let server = MockServer::start().await;
    let (mut fetcher, before) = primed_fetcher(&server).await;

    mount_bootstrap(&server, 200, login_page(REQ_ID)).await;
    mount_login(&server, 200).await;
    mount_usage(&server, 500, json!({"error": "internal"})).await;

    fetcher.refresh().await;

    assert_eq!(fetcher.snapshot(), Some(&before));
    assert!(fetcher.last_error().unwrap().contains("Failed to fetch data"));
}

#[tokio::test]
async fn missing_req_id_keeps_snapshot() {
    let server = MockServer::start().await;
    let (mut fetcher, before) = primed_fetcher(&server).await;

    mount_bootstrap(&server, 200, "<html><body>Maintenance</body></html>".to_string()).await;

    fetcher.refresh().await;

    assert_eq!(fetcher.snapshot(), Some(&before));
    assert!(fetcher.last_error().unwrap().contains("reqId"));
}

#[tokio::test]
async fn malformed_usage_json_keeps_snapshot() {
    let server = MockServer::start().await;
    let (mut fetcher, before) = primed_fetcher(&server).await;

    mount_bootstrap(&server, 200, login_page(REQ_ID)).await;
    mount_login(&server, 200).await;
    mount_usage(&server, 200, json!({"usageMonths": []})).await;

    fetcher.refresh().await;

    assert_eq!(fetcher.snapshot(), Some(&before));
    assert!(fetcher.last_error().is_some());
}

#[tokio::test]
async fn error_cleared_after_recovery() {
    let server = MockServer::start().await;
    let mut fetcher = fetcher_for(&server);

    mount_bootstrap(&server, 500, String::new()).await;
    fetcher.refresh().await;
    assert!(fetcher.snapshot().is_none());
    assert!(fetcher.last_error().is_some());

    server.reset().await;
    mount_happy_path(&server, 250.0, 1024.0).await;
    fetcher.refresh().await;

    assert!(fetcher.snapshot().is_some());
    assert!(fetcher.last_error().is_none());
}

#[tokio::test]
async fn sensor_over_fetcher() {
    let server = MockServer::start().await;
    let mut sensor = UsageSensor::new("Xfinity Usage", fetcher_for(&server));

    assert!(sensor.state().is_none());
    assert!(sensor.attributes().is_none());
    assert!(sensor.unit_of_measurement().is_none());

    mount_happy_path(&server, 250.0, 1024.0).await;
    sensor.update().await;

    assert_eq!(sensor.state(), Some(250.0));
    assert_eq!(sensor.unit_of_measurement(), Some("GB"));
    let attrs = sensor.attributes().unwrap();
    assert_eq!(attrs["attribution"], "Powered by Xfinity");
    assert_eq!(attrs["remaining_usage"], 774.0);
}
