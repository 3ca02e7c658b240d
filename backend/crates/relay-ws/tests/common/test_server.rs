#![allow(dead_code)]

use relay_core::{BoundedBroadcastQueue, DispatchConfig, PresenceTracker};
use relay_ws::{
    AppState, CommandRequester, ConnectionLimits, ConnectionRegistry, Metrics, SessionConfig,
    ShutdownCoordinator,
};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;

/// Configuration for test server instances
#[derive(Clone)]
pub struct TestServerConfig {
    pub capacity: usize,
    pub max_connections: usize,
    pub commands: Option<Arc<dyn CommandRequester>>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            max_connections: 10,
            commands: None,
        }
    }
}

impl TestServerConfig {
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections: 2,
            ..Default::default()
        }
    }

    pub fn with_commands(requester: impl CommandRequester) -> Self {
        Self {
            commands: Some(Arc::new(requester)),
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

/// Must be called from within a Tokio runtime
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

fn create_app(config: TestServerConfig) -> (Router, AppState) {
    let shutdown = ShutdownCoordinator::new();

    let dispatch = DispatchConfig {
        idle_interval: Duration::from_millis(50),
        empty_interval: Duration::from_millis(5),
    };
    let queue = BoundedBroadcastQueue::with_config(config.capacity, dispatch, shutdown.token())
        .expect("Failed to create queue");

    let app_state = AppState {
        queue,
        presence: PresenceTracker::new(),
        registry: ConnectionRegistry::new(ConnectionLimits {
            max_total: config.max_connections,
        }),
        metrics: Metrics::new(),
        shutdown,
        config: SessionConfig::default(),
        commands: config.commands,
    };

    let app = Router::new()
        .route("/ws", get(relay_ws::handler))
        .route("/command", post(relay_ws::command_handler))
        .with_state(app_state.clone());

    (app, app_state)
}
