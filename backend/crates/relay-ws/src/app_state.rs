use crate::{
    CommandRequester, ConnectionId, ConnectionRegistry, Metrics, SessionConfig,
    ShutdownCoordinator, StreamSession, WsError,
};

use relay_core::{BoundedBroadcastQueue, PresenceTracker};

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, header::USER_AGENT},
    response::Response,
};
use log::{debug, error, warn};

/// Shared application state for the relay's handlers
#[derive(Clone)]
pub struct AppState {
    pub queue: BoundedBroadcastQueue<String>,
    pub presence: PresenceTracker,
    pub registry: ConnectionRegistry,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: SessionConfig,
    /// None disables `POST /command`
    pub commands: Option<Arc<dyn CommandRequester>>,
}

/// GET /ws - upgrade to a streaming session
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, WsError> {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    debug!(
        "Streaming upgrade request ({})",
        user_agent.as_deref().unwrap_or("unknown client")
    );

    let connection_id = state
        .registry
        .register(user_agent)
        .await
        .inspect_err(|_| state.metrics.session_rejected())?;

    let registry = state.registry.clone();
    let metrics = state.metrics.clone();

    Ok(ws
        .on_failed_upgrade(move |e| {
            tokio::spawn(release_failed_upgrade(registry, metrics, connection_id, e));
        })
        .on_upgrade(move |socket| handle_socket(socket, connection_id, state)))
}

/// Free the slot `handler` reserved for an upgrade that never completed
pub(crate) async fn release_failed_upgrade(
    registry: ConnectionRegistry,
    metrics: Metrics,
    connection_id: ConnectionId,
    error: axum::Error,
) {
    warn!("Upgrade for session {connection_id} failed: {error}");
    metrics.error_occurred("upgrade_failed");
    registry.unregister(connection_id).await;
}

async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let session = StreamSession::new(
        connection_id,
        state.queue.clone(),
        state.presence.clone(),
        state.config,
        state.metrics.clone(),
    );

    let result = session.handle(socket, shutdown_guard).await;

    state.registry.unregister(connection_id).await;

    if let Err(e) = result {
        error!("Session {connection_id} error: {e}");
    }
}
