use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Send to client failed: {reason} {location}")]
    SendFailed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Subscription channel closed by the queue {location}")]
    StreamClosed { location: ErrorLocation },

    #[error("Connection limit exceeded: {current} sessions (max: {max}) {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("No command requester configured {location}")]
    CommandUnavailable { location: ErrorLocation },

    #[error("Command failed: {message} {location}")]
    CommandFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code, e.g. "CONNECTION_LIMIT"
    pub code: String,
    pub message: String,
}

impl WsError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::SendFailed { .. } => "SEND_FAILED",
            Self::StreamClosed { .. } => "STREAM_CLOSED",
            Self::ConnectionLimitExceeded { .. } => "CONNECTION_LIMIT",
            Self::CommandUnavailable { .. } => "COMMAND_UNAVAILABLE",
            Self::CommandFailed { .. } => "COMMAND_FAILED",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ConnectionLimitExceeded { .. } | Self::CommandUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::CommandFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::ConnectionClosed { .. }
            | Self::SendFailed { .. }
            | Self::StreamClosed { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message, without the source location
    pub fn client_message(&self) -> String {
        match self {
            Self::ConnectionClosed { reason, .. } | Self::SendFailed { reason, .. } => {
                reason.clone()
            }
            Self::StreamClosed { .. } => String::from("subscription closed"),
            Self::ConnectionLimitExceeded { max, .. } => {
                format!("session limit of {max} reached")
            }
            Self::CommandUnavailable { .. } => String::from("command pass-through is not enabled"),
            Self::CommandFailed { message, .. } | Self::Internal { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for WsError {
    fn into_response(self) -> Response {
        log::error!("{}", self);

        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.client_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
