use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for one queue instance
#[derive(Debug, Default)]
pub struct QueueStats {
    pushed: AtomicU64,
    evicted: AtomicU64,
    drained: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
    redelivered: AtomicU64,
    closed: AtomicU64,
}

/// Point-in-time copy of [`QueueStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStatsSnapshot {
    /// Elements accepted from producers
    pub pushed: u64,
    /// Elements evicted from the front to honor the capacity
    pub evicted: u64,
    /// Elements discarded by the backlog drain policy
    pub drained: u64,
    /// Successful sends into subscriber channels
    pub delivered: u64,
    /// Sends skipped because a subscriber channel was full
    pub dropped: u64,
    /// Elements put back after a cycle where nobody accepted them
    pub redelivered: u64,
    /// Subscriptions removed from the registry
    pub closed: u64,
}

impl QueueStats {
    pub(crate) fn record_push(&self, evicted: usize) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
        self.record_evicted(evicted);
    }

    pub(crate) fn record_evicted(&self, evicted: usize) {
        if evicted > 0 {
            self.evicted.fetch_add(evicted as u64, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_drained(&self, count: usize) {
        self.drained.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_fan_out(&self, delivered: usize, dropped: usize) {
        self.delivered.fetch_add(delivered as u64, Ordering::Relaxed);
        self.dropped.fetch_add(dropped as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_redelivery(&self) {
        self.redelivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_closed(&self, count: usize) {
        self.closed.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> QueueStatsSnapshot {
        QueueStatsSnapshot {
            pushed: self.pushed.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            drained: self.drained.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            redelivered: self.redelivered.load(Ordering::Relaxed),
            closed: self.closed.load(Ordering::Relaxed),
        }
    }
}
