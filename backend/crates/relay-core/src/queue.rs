use crate::{
    BoundedBuffer, CoreError, DispatchConfig, QueueStats, QueueStatsSnapshot, Result as CoreResult,
    Subscription, SubscriptionId, dispatcher,
};

use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::runtime::Handle;
use tokio::sync::{Notify, mpsc};
use tokio_util::sync::CancellationToken;

/// Capacity-bounded queue that fans every element out to all live subscribers.
///
/// `push` never blocks and never fails: when the buffer is full the oldest
/// element is evicted. A background dispatcher, started by the constructor,
/// pops elements and offers each one to every subscription with a
/// non-blocking send. A subscriber whose channel is full simply misses that
/// element. An element nobody accepted goes back to the tail of the buffer.
pub struct BoundedBroadcastQueue<T> {
    inner: Arc<QueueInner<T>>,
}

pub(crate) struct QueueInner<T> {
    capacity: usize,
    state: Mutex<QueueState<T>>,
    pub(crate) wake: Notify,
    stats: QueueStats,
}

struct QueueState<T> {
    buffer: BoundedBuffer<T>,
    /// Registration order is fan-out order
    subscribers: Vec<Subscriber<T>>,
    /// Set once the dispatcher has stopped; no further registrations
    closed: bool,
}

struct Subscriber<T> {
    id: SubscriptionId,
    sender: mpsc::Sender<T>,
    cancel: CancellationToken,
}

/// Result of a single dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DispatchOutcome {
    NoSubscribers,
    Empty,
    Delivered { accepted: usize },
    Undelivered,
}

impl<T> BoundedBroadcastQueue<T>
where
    T: Clone + Send + 'static,
{
    /// Create a queue with default dispatch timing.
    ///
    /// Must be called from within a Tokio runtime; the dispatcher stops when
    /// `shutdown` is cancelled or the last queue handle is dropped.
    #[track_caller]
    pub fn new(capacity: usize, shutdown: CancellationToken) -> CoreResult<Self> {
        Self::with_config(capacity, DispatchConfig::default(), shutdown)
    }

    #[track_caller]
    pub fn with_config(
        capacity: usize,
        config: DispatchConfig,
        shutdown: CancellationToken,
    ) -> CoreResult<Self> {
        if capacity == 0 {
            return Err(CoreError::capacity(capacity));
        }
        config.validate()?;

        let location = Location::caller();
        let handle = Handle::try_current().map_err(|_| CoreError::RuntimeUnavailable {
            location: ErrorLocation::from(location),
        })?;

        let inner = QueueInner::new(capacity);
        handle.spawn(dispatcher::run(Arc::downgrade(&inner), config, shutdown));
        info!("Created broadcast queue with capacity {capacity}");

        Ok(Self { inner })
    }
}

impl<T: Clone> BoundedBroadcastQueue<T> {
    /// Append an element, evicting the oldest ones if the buffer is full
    pub fn push(&self, element: T) {
        let evicted = {
            let mut state = self.inner.lock();
            state.buffer.push(element)
        };
        self.inner.stats.record_push(evicted);
        if evicted > 0 {
            debug!("Buffer full, evicted {evicted} oldest element(s)");
        }
        self.inner.wake.notify_one();
    }

    /// Remove and return the oldest element
    pub fn pop(&self) -> Option<T> {
        self.inner.lock().buffer.pop()
    }

    /// Register a subscription whose channel holds up to `capacity` elements.
    ///
    /// The subscription stays registered until `cancel` fires (observed by
    /// the dispatcher on its next pass) or the dispatcher shuts down. Once
    /// the dispatcher has stopped, the returned channel is already closed.
    pub fn fetch(&self, cancel: CancellationToken) -> Subscription<T> {
        let (sender, receiver) = mpsc::channel(self.inner.capacity);
        let id = SubscriptionId::new();

        let total = {
            let mut state = self.inner.lock();
            if state.closed {
                drop(state);
                drop(sender);
                debug!("Dispatcher stopped, subscription {id} closed on registration");
                return Subscription::new(id, receiver, cancel);
            }
            state.subscribers.push(Subscriber {
                id,
                sender,
                cancel: cancel.clone(),
            });
            state.subscribers.len()
        };

        info!("Registered subscription {id} ({total} total)");
        self.inner.wake.notify_one();

        Subscription::new(id, receiver, cancel)
    }

    /// Fixed capacity of the buffer and of every subscription channel
    pub fn max_size(&self) -> usize {
        self.inner.capacity
    }

    /// Discard the whole backlog, returning how many elements were dropped
    pub fn clear(&self) -> usize {
        let discarded = self.inner.lock().buffer.clear();
        self.inner.stats.record_drained(discarded);
        discarded
    }

    /// Copy of the buffered elements, oldest first
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.lock().buffer.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().buffer.is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner.lock().subscribers.iter().any(|s| s.id == id)
    }

    pub fn stats(&self) -> QueueStatsSnapshot {
        self.inner.stats.snapshot()
    }
}

impl<T> QueueInner<T> {
    fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity,
            state: Mutex::new(QueueState {
                buffer: BoundedBuffer::new(capacity),
                subscribers: Vec::new(),
                closed: false,
            }),
            wake: Notify::new(),
            stats: QueueStats::default(),
        })
    }
}

impl<T: Clone> QueueInner<T> {
    /// Lock the shared state. A poisoned lock is recovered: buffer and
    /// registry stay structurally valid across a panic in another holder.
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pop one element and offer it to every live subscriber.
    ///
    /// The registry is walked while the lock is held, so registrations and
    /// removals never interleave with the walk. Sends are `try_send` and
    /// never wait.
    pub(crate) fn dispatch_once(&self) -> DispatchOutcome {
        let mut state = self.lock();

        if state.subscribers.is_empty() {
            return DispatchOutcome::NoSubscribers;
        }

        let Some(element) = state.buffer.pop() else {
            self.prune_cancelled(&mut state);
            return DispatchOutcome::Empty;
        };

        let before = state.subscribers.len();
        let mut accepted = 0;
        let mut dropped = 0;

        state.subscribers.retain(|sub| {
            if sub.cancel.is_cancelled() {
                debug!("Subscription {} cancelled, closing channel", sub.id);
                return false;
            }

            match sub.sender.try_send(element.clone()) {
                Ok(()) => {
                    accepted += 1;
                    true
                }
                Err(mpsc::error::TrySendError::Full(_)) => {
                    dropped += 1;
                    debug!("Subscription {} channel full, element skipped", sub.id);
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    warn!(
                        "Subscription {} receiver dropped without cancellation, removing",
                        sub.id
                    );
                    false
                }
            }
        });

        let removed = before - state.subscribers.len();
        self.stats.record_fan_out(accepted, dropped);
        self.stats.record_closed(removed);
        if removed > 0 {
            info!(
                "Removed {removed} subscription(s) ({} remaining)",
                state.subscribers.len()
            );
        }

        if accepted == 0 {
            let evicted = state.buffer.push(element);
            self.stats.record_evicted(evicted);
            self.stats.record_redelivery();
            return DispatchOutcome::Undelivered;
        }

        DispatchOutcome::Delivered { accepted }
    }

    fn prune_cancelled(&self, state: &mut QueueState<T>) {
        let before = state.subscribers.len();
        state.subscribers.retain(|sub| {
            let live = !sub.cancel.is_cancelled() && !sub.sender.is_closed();
            if !live {
                debug!("Subscription {} ended, closing channel", sub.id);
            }
            live
        });

        let removed = before - state.subscribers.len();
        if removed > 0 {
            self.stats.record_closed(removed);
            info!(
                "Removed {removed} subscription(s) ({} remaining)",
                state.subscribers.len()
            );
        }
    }

    /// Drop every subscription, closing all delivery channels, and refuse
    /// later registrations
    pub(crate) fn close_all(&self) -> usize {
        let mut state = self.lock();
        state.closed = true;
        let closed = state.subscribers.len();
        state.subscribers.clear();
        self.stats.record_closed(closed);
        closed
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Clone for BoundedBroadcastQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
impl<T: Clone> BoundedBroadcastQueue<T> {
    /// Queue with no dispatcher task; cycles are driven by `dispatch_once`
    pub(crate) fn without_dispatcher(capacity: usize) -> Self {
        Self {
            inner: QueueInner::new(capacity),
        }
    }

    pub(crate) fn dispatch_once(&self) -> DispatchOutcome {
        self.inner.dispatch_once()
    }
}
