// Integration tests: HTTP endpoints

mod common;

use axum_test::TestServer;
use common::*;
use docker_status::models::ContainerSnapshot;
use docker_status::routes;
use std::sync::Arc;

fn test_server(runtime: FakeRuntime) -> TestServer {
    let transport = Arc::new(FakeTransport::new(&[("http://web/health", 200)]));
    let agg = aggregator(
        Arc::new(runtime),
        transport,
        checks(&[("web", "http://web/health")]),
        8,
    );
    TestServer::new(routes::app(Arc::new(agg)))
}

#[tokio::test]
async fn test_root_lists_snapshots_in_order() {
    let runtime = FakeRuntime::new(vec![running("web"), exited("job")])
        .with_stats("web-id", busy_sample());
    let server = test_server(runtime);

    let response = server.get("/").await;
    response.assert_status_ok();
    let snapshots: Vec<ContainerSnapshot> = response.json();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].name, "web");
    assert_eq!(snapshots[0].health, "HTTP OK");
    assert_eq!(snapshots[0].cpu, 40.0);
    assert_eq!(snapshots[1].name, "job");
    assert_eq!(snapshots[1].uptime, "-");
}

#[tokio::test]
async fn test_root_with_no_containers_is_empty_array() {
    let server = test_server(FakeRuntime::new(vec![]));
    let response = server.get("/").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_root_listing_failure_is_bad_gateway() {
    let server = test_server(FakeRuntime {
        fail_listing: true,
        ..Default::default()
    });
    let response = server.get("/").await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = response.json();
    assert!(json.get("error").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_self_endpoint() {
    let server = test_server(FakeRuntime::new(vec![]));
    let response = server.get("/self").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
    let ts = json.get("timestamp").and_then(|v| v.as_str()).unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "{ts}");
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = test_server(FakeRuntime::new(vec![]));
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("name").and_then(|v| v.as_str()),
        Some("docker-status")
    );
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let server = test_server(FakeRuntime::new(vec![]));
    let response = server.get("/nope").await;
    response.assert_status_not_found();
    let json: serde_json::Value = response.json();
    assert_eq!(json, serde_json::json!({ "error": "not found" }));
}
