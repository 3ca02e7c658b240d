use relay_server::{ServerError, ServerState, StdinProducer, build_router, logger};

use relay_config::Config;
use relay_core::{BacklogDrain, BoundedBroadcastQueue, DispatchConfig, PresenceTracker};
use relay_ws::{
    AppState, ConnectionLimits, ConnectionRegistry, Metrics, SessionConfig, ShutdownCoordinator,
};

use std::error::Error;

use log::{error, info};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir).map_err(|e| ServerError::io("creating log directory", e))?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::metrics(format!("Failed to install recorder: {e}")))?;

    let shutdown = ShutdownCoordinator::new();

    // The dispatcher runs on the root token; shutdown closes every subscription
    let dispatch = DispatchConfig {
        idle_interval: config.queue.idle_poll(),
        empty_interval: config.queue.empty_poll(),
    };
    let queue =
        BoundedBroadcastQueue::with_config(config.queue.capacity, dispatch, shutdown.token())
            .map_err(ServerError::from)?;
    let presence = PresenceTracker::new();

    if config.queue.drain_when_disconnected {
        BacklogDrain::new(queue.clone(), presence.clone(), config.queue.drain_interval())
            .spawn(shutdown.token());
    }

    StdinProducer::new(queue.clone()).spawn(shutdown.token())?;
    info!("Producer reading from stdin");

    let app_state = AppState {
        queue,
        presence,
        registry: ConnectionRegistry::new(ConnectionLimits {
            max_total: config.server.max_connections,
        }),
        metrics: Metrics::new(),
        shutdown: shutdown.clone(),
        config: SessionConfig::from(&config.stream),
        commands: None,
    };
    info!("Command pass-through disabled: no requester configured");

    let app = build_router(ServerState {
        app: app_state,
        prometheus,
    });

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Actual bound address matters when port is 0 / auto-assigned
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown_for_signal.shutdown();
    });

    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM
async fn wait_for_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
