use crate::error::{Result as ServerErrorResult, ServerError};

use relay_core::BoundedBroadcastQueue;

use std::io::BufRead;
use std::thread::JoinHandle;

use log::{debug, error, info};
use tokio_util::sync::CancellationToken;

/// Event source that feeds newline-delimited payloads into the queue.
///
/// Runs on a dedicated OS thread because reads block. End of input stops
/// the source only; the server keeps serving the retained backlog.
pub struct StdinProducer {
    queue: BoundedBroadcastQueue<String>,
}

impl StdinProducer {
    pub fn new(queue: BoundedBroadcastQueue<String>) -> Self {
        Self { queue }
    }

    /// Push every non-empty line of `reader`, returning how many were pushed
    pub fn run<R: BufRead>(
        &self,
        reader: R,
        shutdown: &CancellationToken,
    ) -> ServerErrorResult<usize> {
        let mut pushed = 0;

        for line in reader.lines() {
            if shutdown.is_cancelled() {
                debug!("Producer stopping on shutdown");
                break;
            }

            let line = line.map_err(|e| ServerError::io("reading producer input", e))?;
            let payload = line.trim_end_matches('\r');
            if payload.is_empty() {
                continue;
            }

            self.queue.push(payload.to_string());
            pushed += 1;
        }

        Ok(pushed)
    }

    /// Read stdin on a named thread until end of input or shutdown
    pub fn spawn(self, shutdown: CancellationToken) -> ServerErrorResult<JoinHandle<()>> {
        std::thread::Builder::new()
            .name(String::from("stdin-producer"))
            .spawn(move || {
                let stdin = std::io::stdin();
                match self.run(stdin.lock(), &shutdown) {
                    Ok(pushed) => info!("Producer input ended after {pushed} message(s)"),
                    Err(e) => error!("Producer stopped: {e}"),
                }
            })
            .map_err(|e| ServerError::io("spawning producer thread", e))
    }
}
