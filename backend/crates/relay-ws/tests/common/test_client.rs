use relay_proto::DataResponse;

use std::time::Duration;

use axum_test::{TestServer, TestWebSocket};
use prost::Message;

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(2);

/// Streaming consumer over a test WebSocket
pub struct StreamTestClient {
    ws: TestWebSocket,
}

impl StreamTestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server
            .get_websocket("/ws")
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    /// Receive and decode the next forwarded element
    pub async fn receive_data(&mut self) -> DataResponse {
        let bytes = tokio::time::timeout(RECEIVE_TIMEOUT, self.ws.receive_bytes())
            .await
            .expect("Timed out waiting for a data frame");
        DataResponse::decode(bytes).expect("Frame is not a DataResponse")
    }

    pub async fn receive_message(&mut self) -> String {
        self.receive_data().await.message
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Poll `condition` until it holds, panicking after two seconds
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + RECEIVE_TIMEOUT;
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "Condition not met within {RECEIVE_TIMEOUT:?}"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
