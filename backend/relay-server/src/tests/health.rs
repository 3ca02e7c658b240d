use crate::{ServerState, build_router};

use relay_core::{BoundedBroadcastQueue, PresenceTracker};
use relay_ws::{
    AppState, ConnectionLimits, ConnectionRegistry, Metrics, SessionConfig, ShutdownCoordinator,
};

use axum::http::StatusCode;
use axum_test::TestServer;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;

/// Must be called from within a Tokio runtime
fn test_state(capacity: usize) -> ServerState {
    let shutdown = ShutdownCoordinator::new();
    let queue = BoundedBroadcastQueue::new(capacity, shutdown.token()).unwrap();

    ServerState {
        app: AppState {
            queue,
            presence: PresenceTracker::new(),
            registry: ConnectionRegistry::new(ConnectionLimits { max_total: 4 }),
            metrics: Metrics::new(),
            shutdown,
            config: SessionConfig::default(),
            commands: None,
        },
        prometheus: PrometheusBuilder::new().build_recorder().handle(),
    }
}

fn test_server(state: &ServerState) -> TestServer {
    TestServer::builder()
        .build(build_router(state.clone()))
        .expect("Failed to create test server")
}

#[tokio::test]
async fn given_backlog_without_consumers_when_health_then_reports_queue_shape() {
    // Given
    let state = test_state(8);
    state.app.queue.push(String::from("retained"));
    let server = test_server(&state);

    // When
    let response = server.get("/health").await;

    // Then
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["queue"]["capacity"], 8);
    assert_eq!(body["queue"]["buffered"], 1);
    assert_eq!(body["queue"]["subscribers"], 0);
    assert_eq!(body["presence"]["connected"], false);
    assert_eq!(body["sessions"]["max"], 4);
    assert_eq!(body["stats"]["pushed"], 1);
}

#[tokio::test]
async fn given_attached_consumer_when_health_then_presence_reported() {
    // Given
    let state = test_state(8);
    state.app.presence.connected();
    let server = test_server(&state);

    // When
    let body: Value = server.get("/health").await.json();

    // Then
    assert_eq!(body["presence"]["connected"], true);
    assert_eq!(body["presence"]["sessions"], 1);
}

#[tokio::test]
async fn given_running_server_when_probes_then_ok() {
    let state = test_state(4);
    let server = test_server(&state);

    let live = server.get("/live").await;
    live.assert_status_ok();
    assert_eq!(live.text(), "OK");

    server.get("/ready").await.assert_status_ok();
}

#[tokio::test]
async fn given_shutdown_started_when_ready_then_503_and_health_reports_it() {
    // Given
    let state = test_state(4);
    let server = test_server(&state);

    // When
    state.app.shutdown.shutdown();

    // Then
    server
        .get("/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "shutting_down");
}

#[tokio::test]
async fn given_metrics_endpoint_when_requested_then_prometheus_text() {
    let state = test_state(4);
    let server = test_server(&state);

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type"),
        "text/plain; version=0.0.4"
    );
}

#[tokio::test]
async fn given_reports_from_two_sessions_when_scraped_then_counts_accumulate() {
    // Given
    let recorder = PrometheusBuilder::new().build_recorder();
    let mut state = test_state(8);
    state.prometheus = recorder.handle();
    metrics::with_local_recorder(&recorder, || {
        state.app.metrics.session_report(3);
        state.app.metrics.session_report(4);
    });
    let server = test_server(&state);

    // When
    let response = server.get("/metrics").await;

    // Then
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("relay_ws_messages_reported 7"), "{body}");
    assert!(body.contains("relay_ws_sessions_reports 2"), "{body}");
}
