use crate::WsError;

use std::panic::Location;

use axum::{http::StatusCode, response::IntoResponse};
use error_location::ErrorLocation;
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[test]
fn given_limit_error_when_mapped_then_503_with_code() {
    let error = WsError::ConnectionLimitExceeded {
        current: 5,
        max: 5,
        location: here(),
    };

    assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error.error_code(), "CONNECTION_LIMIT");
    assert_eq!(error.client_message(), "session limit of 5 reached");
}

#[test]
fn given_command_errors_when_mapped_then_503_and_502() {
    let unavailable = WsError::CommandUnavailable { location: here() };
    let failed = WsError::CommandFailed {
        message: String::from("gateway down"),
        location: here(),
    };

    assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(failed.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(failed.error_code(), "COMMAND_FAILED");
}

#[test]
fn given_stream_errors_when_mapped_then_internal() {
    let closed = WsError::StreamClosed { location: here() };
    let send = WsError::SendFailed {
        reason: String::from("broken pipe"),
        location: here(),
    };

    assert_eq!(closed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(closed.error_code(), "STREAM_CLOSED");
    assert_eq!(send.client_message(), "broken pipe");
}

#[tokio::test]
async fn given_error_when_into_response_then_json_body() {
    // Given
    let error = WsError::CommandFailed {
        message: String::from("gateway down"),
        location: here(),
    };

    // When
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Then
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "COMMAND_FAILED");
    assert_eq!(json["error"]["message"], "gateway down");
}
