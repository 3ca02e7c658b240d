use crate::{ConnectionId, ConnectionInfo, ConnectionLimits, Result as WsErrorResult, WsError};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};
use tokio::sync::RwLock;

/// Registry of attached streaming sessions
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
}

struct RegistryInner {
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
            })),
            limits,
        }
    }

    /// Register a session, failing once `max_total` sessions are attached
    pub async fn register(&self, user_agent: Option<String>) -> WsErrorResult<ConnectionId> {
        let mut inner = self.inner.write().await;

        if inner.connections.len() >= self.limits.max_total {
            warn!(
                "Session limit reached: {}/{}",
                inner.connections.len(),
                self.limits.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                current: inner.connections.len(),
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let connection_id = ConnectionId::new();
        let info = ConnectionInfo {
            connection_id,
            user_agent,
            connected_at: chrono::Utc::now(),
        };

        inner.connections.insert(connection_id, info);
        info!(
            "Registered session {connection_id} ({} total)",
            inner.connections.len()
        );

        Ok(connection_id)
    }

    /// Free a session's slot, returning what was recorded at registration
    pub async fn unregister(&self, connection_id: ConnectionId) -> Option<ConnectionInfo> {
        let mut inner = self.inner.write().await;

        let removed = inner.connections.remove(&connection_id)?;
        let attached = (chrono::Utc::now() - removed.connected_at).num_seconds();
        info!(
            "Unregistered session {connection_id} from {} after {attached}s ({} remaining)",
            removed.user_agent.as_deref().unwrap_or("unknown client"),
            inner.connections.len()
        );

        Some(removed)
    }

    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }

    pub fn max_total(&self) -> usize {
        self.limits.max_total
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
        }
    }
}
