use crate::ServerState;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - queue, presence and session status
pub async fn health(State(state): State<ServerState>) -> Response {
    let app = &state.app;
    let stats = app.queue.stats();
    let active_sessions = app.registry.total_count().await;

    let status = if app.shutdown.is_shutdown() {
        "shutting_down"
    } else {
        "healthy"
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "queue": {
            "capacity": app.queue.max_size(),
            "buffered": app.queue.len(),
            "subscribers": app.queue.subscriber_count(),
        },
        "presence": {
            "connected": app.presence.is_connected(),
            "sessions": app.presence.session_count(),
        },
        "sessions": {
            "active": active_sessions,
            "max": app.registry.max_total(),
        },
        "stats": {
            "pushed": stats.pushed,
            "evicted": stats.evicted,
            "drained": stats.drained,
            "delivered": stats.delivered,
            "dropped": stats.dropped,
            "redelivered": stats.redelivered,
            "closed": stats.closed,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe; not ready once shutdown has begun
pub async fn readiness(State(state): State<ServerState>) -> Response {
    if state.app.shutdown.is_shutdown() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }

    (StatusCode::OK, "Ready").into_response()
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics(State(state): State<ServerState>) -> Response {
    let app = &state.app;
    app.metrics.queue_observed(
        app.queue.len(),
        app.queue.subscriber_count(),
        &app.queue.stats(),
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.prometheus.render(),
    )
        .into_response()
}
