use crate::SubscriptionId;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio_util::sync::CancellationToken;

/// Read side of a queue subscription.
///
/// The channel is closed by the queue once it notices the cancellation
/// signal (or on dispatcher shutdown); `recv` then returns `None` after the
/// already delivered elements are drained.
pub struct Subscription<T> {
    id: SubscriptionId,
    receiver: mpsc::Receiver<T>,
    cancel: CancellationToken,
}

impl<T> Subscription<T> {
    pub(crate) fn new(
        id: SubscriptionId,
        receiver: mpsc::Receiver<T>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            id,
            receiver,
            cancel,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next element; `None` once the queue closed the channel
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Fire the cancellation signal handed to `fetch`
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Number of delivered elements waiting to be read
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}
