use crate::{
    ConnectionId, ForwardReport, Metrics, Result as WsErrorResult, SessionConfig, ShutdownGuard,
    WsError,
};

use relay_core::{BoundedBroadcastQueue, PresenceTracker};
use relay_proto::DataResponse;

use std::panic::Location;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use prost::Message as _;
use tokio::time::{Instant, sleep};

/// One streaming consumer: a queue subscription forwarded over a WebSocket.
///
/// Marks the consumer present for the whole session and cancels its
/// subscription on every exit path.
pub struct StreamSession {
    connection_id: ConnectionId,
    queue: BoundedBroadcastQueue<String>,
    presence: PresenceTracker,
    config: SessionConfig,
    metrics: Metrics,
}

/// Why the forwarding loop stopped
enum SessionEnd {
    PeerClosed,
    Shutdown,
    Failed(WsError),
}

impl StreamSession {
    pub fn new(
        connection_id: ConnectionId,
        queue: BoundedBroadcastQueue<String>,
        presence: PresenceTracker,
        config: SessionConfig,
        metrics: Metrics,
    ) -> Self {
        Self {
            connection_id,
            queue,
            presence,
            config,
            metrics,
        }
    }

    pub async fn handle(
        self,
        socket: WebSocket,
        shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        self.presence.connected();
        self.metrics.session_established();
        info!("Client connected (session {})", self.connection_id);

        let mut subscription = self.queue.fetch(shutdown_guard.child_token());
        let (mut ws_sender, mut ws_receiver) = socket.split();

        let mut report = ForwardReport::new(self.config.report_interval);

        let idle = sleep(self.config.idle_notice);
        tokio::pin!(idle);

        let end = loop {
            tokio::select! {
                element = subscription.recv() => {
                    let Some(message) = element else {
                        if shutdown_guard.poll_shutdown() {
                            break SessionEnd::Shutdown;
                        }
                        break SessionEnd::Failed(WsError::StreamClosed {
                            location: ErrorLocation::from(Location::caller()),
                        });
                    };

                    let frame = Bytes::from(DataResponse::new(message).encode_to_vec());
                    if let Err(e) = ws_sender.send(Message::Binary(frame)).await {
                        self.metrics.error_occurred("send_failed");
                        break SessionEnd::Failed(WsError::SendFailed {
                            reason: e.to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }

                    report.record();
                    self.metrics.message_forwarded();
                    idle.as_mut().reset(Instant::now() + self.config.idle_notice);
                }

                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => break SessionEnd::PeerClosed,
                        Some(Ok(_)) => {
                            debug!("Ignoring inbound frame on session {}", self.connection_id);
                        }
                        Some(Err(e)) => {
                            break SessionEnd::Failed(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {e}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }
                }

                forwarded = report.next_report() => {
                    info!(
                        "Session {} forwarded {} message(s) in the last {:?}",
                        self.connection_id,
                        forwarded,
                        report.period()
                    );
                    self.metrics.session_report(forwarded);
                }

                () = &mut idle => {
                    debug!("No message received on session {}", self.connection_id);
                    idle.as_mut().reset(Instant::now() + self.config.idle_notice);
                }

                _ = shutdown_guard.wait() => break SessionEnd::Shutdown,
            }
        };

        subscription.cancel();
        drop(subscription);

        let (reason, result) = match end {
            SessionEnd::PeerClosed => {
                info!("Session {} closed by client", self.connection_id);
                ("normal", Ok(()))
            }
            SessionEnd::Shutdown => {
                info!("Shutting down session {} gracefully", self.connection_id);
                let _ = ws_sender
                    .send(Message::Close(Some(CloseFrame {
                        code: close_code::AWAY,
                        reason: "server shutting down".into(),
                    })))
                    .await;
                ("shutdown", Ok(()))
            }
            SessionEnd::Failed(e) => {
                warn!("Session {} ending: {}", self.connection_id, e);
                if matches!(e, WsError::StreamClosed { .. }) {
                    let _ = ws_sender
                        .send(Message::Close(Some(CloseFrame {
                            code: close_code::ERROR,
                            reason: e.error_code().into(),
                        })))
                        .await;
                }
                ("error", Err(e))
            }
        };

        self.presence.disconnected();
        self.metrics.session_closed(reason);
        info!(
            "Client disconnected (session {}, {} message(s) forwarded)",
            self.connection_id,
            report.total()
        );

        result
    }
}
