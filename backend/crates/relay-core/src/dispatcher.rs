use crate::DispatchConfig;
use crate::queue::{DispatchOutcome, QueueInner};

use std::sync::Weak;
use std::time::Duration;

use log::{debug, info};
use tokio_util::sync::CancellationToken;

/// Background fan-out loop, one per queue.
///
/// Waits are bounded by the configured intervals and cut short whenever
/// `push` or `fetch` signals the queue. The loop ends when `shutdown` fires
/// or every queue handle is gone; on the way out all delivery channels are
/// closed.
pub(crate) async fn run<T>(
    queue: Weak<QueueInner<T>>,
    config: DispatchConfig,
    shutdown: CancellationToken,
) where
    T: Clone + Send + 'static,
{
    debug!(
        "Dispatcher started (idle {:?}, empty {:?})",
        config.idle_interval, config.empty_interval
    );

    loop {
        let Some(inner) = queue.upgrade() else {
            debug!("Queue dropped, dispatcher exiting");
            return;
        };

        if shutdown.is_cancelled() {
            close(&inner);
            return;
        }

        let wait = next_wait(inner.dispatch_once(), &config);

        match wait {
            Some(wait) => {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        close(&inner);
                        return;
                    }
                    _ = inner.wake.notified() => {}
                    _ = tokio::time::sleep(wait) => {}
                }
            }
            None => tokio::task::yield_now().await,
        }
    }
}

fn next_wait(outcome: DispatchOutcome, config: &DispatchConfig) -> Option<Duration> {
    match outcome {
        DispatchOutcome::NoSubscribers => Some(config.idle_interval),
        DispatchOutcome::Empty => Some(config.empty_interval),
        // every subscriber was full; give readers a moment before retrying
        DispatchOutcome::Undelivered => Some(config.empty_interval),
        DispatchOutcome::Delivered { .. } => None,
    }
}

fn close<T: Clone>(inner: &QueueInner<T>) {
    let closed = inner.close_all();
    info!(
        "Dispatcher for queue (capacity {}) stopped, closed {closed} subscription(s)",
        inner.capacity()
    );
}
