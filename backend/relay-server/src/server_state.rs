use relay_ws::AppState;

use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;

/// Router state: the relay's shared state plus the metrics exporter handle
#[derive(Clone)]
pub struct ServerState {
    pub app: AppState,
    pub prometheus: PrometheusHandle,
}

impl FromRef<ServerState> for AppState {
    fn from_ref(state: &ServerState) -> Self {
        state.app.clone()
    }
}
