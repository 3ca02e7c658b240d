use crate::{BoundedBroadcastQueue, PresenceTracker};

use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Discards the buffered backlog while no streaming session is attached.
///
/// Off by default in the server: without it the first consumer to attach
/// receives up to `capacity` retained elements.
pub struct BacklogDrain<T> {
    queue: BoundedBroadcastQueue<T>,
    presence: PresenceTracker,
    interval: Duration,
}

impl<T> BacklogDrain<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(
        queue: BoundedBroadcastQueue<T>,
        presence: PresenceTracker,
        interval: Duration,
    ) -> Self {
        Self {
            queue,
            presence,
            interval,
        }
    }

    /// One policy check; returns the number of discarded elements
    pub fn drain_once(&self) -> usize {
        if self.presence.is_connected() {
            return 0;
        }

        let discarded = self.queue.clear();
        if discarded > 0 {
            debug!("No session attached, discarded {discarded} buffered element(s)");
        }
        discarded
    }

    pub async fn run(self, shutdown: CancellationToken) {
        info!("Backlog drain enabled (every {:?})", self.interval);

        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.drain_once();
                }
            }
        }

        info!("Backlog drain stopped");
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
