use crate::{AppState, Result as WsErrorResult, WsError};

use relay_proto::{SendCommandRequest, SendCommandResponse};

use std::panic::Location;
use std::sync::Arc;

use axum::{Json, extract::State};
use error_location::ErrorLocation;
use log::{debug, warn};

/// POST /command - forward one command and return its reply
pub async fn command_handler(
    State(state): State<AppState>,
    Json(request): Json<SendCommandRequest>,
) -> WsErrorResult<Json<SendCommandResponse>> {
    let requester = state
        .commands
        .as_ref()
        .map(Arc::clone)
        .ok_or_else(|| WsError::CommandUnavailable {
            location: ErrorLocation::from(Location::caller()),
        })?;

    state.metrics.command_requested();
    debug!("Forwarding command ({} bytes)", request.message.len());

    let message = request.message;
    let outcome = tokio::task::spawn_blocking(move || requester.send_command(&message))
        .await
        .map_err(|e| WsError::Internal {
            message: format!("command task failed: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match outcome {
        Ok(reply) => Ok(Json(SendCommandResponse { message: reply })),
        Err(e) => {
            warn!("Command requester failed: {e}");
            state.metrics.command_failed();
            Err(WsError::CommandFailed {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
