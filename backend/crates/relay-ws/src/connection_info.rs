use crate::ConnectionId;

use chrono::{DateTime, Utc};

/// Information about an attached streaming session
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    /// `User-Agent` of the upgrade request, when the client sent one
    pub user_agent: Option<String>,
    pub connected_at: DateTime<Utc>,
}
