pub mod app_state;
pub mod command_handler;
pub mod command_requester;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod error;
pub mod forward_report;
pub mod metrics;
pub mod session_config;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod stream_session;

pub use app_state::{AppState, handler};
pub use command_handler::command_handler;
pub use command_requester::{CommandRequester, CommandResult};
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use error::{Result, WsError};
pub use forward_report::ForwardReport;
pub use metrics::Metrics;
pub use session_config::SessionConfig;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use stream_session::StreamSession;

#[cfg(test)]
mod tests;
