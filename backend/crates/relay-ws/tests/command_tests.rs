mod common;

use common::test_server::{TestServerConfig, create_test_server, create_test_server_with_config};

use relay_proto::SendCommandResponse;
use relay_ws::CommandResult;

use axum::http::StatusCode;
use serde_json::{Value, json};

fn echo(message: &str) -> CommandResult {
    Ok(format!("<result>{message}</result>"))
}

fn failing(_message: &str) -> CommandResult {
    Err("connector not ready".into())
}

#[tokio::test]
async fn given_requester_when_command_posted_then_reply_returned() {
    // Given
    let test_server = create_test_server_with_config(TestServerConfig::with_commands(echo));

    // When
    let response = test_server
        .server
        .post("/command")
        .json(&json!({ "message": "<command id=\"server_status\"/>" }))
        .await;

    // Then
    response.assert_status_ok();
    let body: SendCommandResponse = response.json();
    assert_eq!(body.message, "<result><command id=\"server_status\"/></result>");
}

#[tokio::test]
async fn given_no_requester_when_command_posted_then_503() {
    // Given
    let test_server = create_test_server();

    // When
    let response = test_server
        .server
        .post("/command")
        .json(&json!({ "message": "ping" }))
        .expect_failure()
        .await;

    // Then
    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "COMMAND_UNAVAILABLE");
}

#[tokio::test]
async fn given_failing_requester_when_command_posted_then_502() {
    // Given
    let test_server = create_test_server_with_config(TestServerConfig::with_commands(failing));

    // When
    let response = test_server
        .server
        .post("/command")
        .json(&json!({ "message": "ping" }))
        .expect_failure()
        .await;

    // Then
    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "COMMAND_FAILED");
    assert_eq!(body["error"]["message"], "connector not ready");
}
