use relay_core::QueueStatsSnapshot;

use metrics::{counter, gauge};

/// Metrics collector for the relay's streaming and command surfaces
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "relay_ws" }
    }

    pub fn session_established(&self) {
        counter!(format!("{}.sessions.established", self.prefix)).increment(1);
        gauge!(format!("{}.sessions.active", self.prefix)).increment(1.0);
    }

    pub fn session_closed(&self, reason: &str) {
        counter!(format!("{}.sessions.closed", self.prefix)).increment(1);
        counter!(format!("{}.sessions.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.sessions.active", self.prefix)).decrement(1.0);
    }

    /// Upgrade refused because the session limit was reached
    pub fn session_rejected(&self) {
        counter!(format!("{}.sessions.rejected", self.prefix)).increment(1);
    }

    pub fn message_forwarded(&self) {
        counter!(format!("{}.messages.forwarded", self.prefix)).increment(1);
    }

    /// One session's count for a finished report interval
    pub fn session_report(&self, forwarded: u64) {
        counter!(format!("{}.sessions.reports", self.prefix)).increment(1);
        counter!(format!("{}.messages.reported", self.prefix)).increment(forwarded);
    }

    pub fn command_requested(&self) {
        counter!(format!("{}.commands.requested", self.prefix)).increment(1);
    }

    pub fn command_failed(&self) {
        counter!(format!("{}.commands.failed", self.prefix)).increment(1);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }

    /// Publish the queue's current shape and lifetime counters as gauges
    pub fn queue_observed(&self, buffered: usize, subscribers: usize, stats: &QueueStatsSnapshot) {
        gauge!(format!("{}.queue.buffered", self.prefix)).set(buffered as f64);
        gauge!(format!("{}.queue.subscribers", self.prefix)).set(subscribers as f64);
        gauge!(format!("{}.queue.pushed", self.prefix)).set(stats.pushed as f64);
        gauge!(format!("{}.queue.evicted", self.prefix)).set(stats.evicted as f64);
        gauge!(format!("{}.queue.delivered", self.prefix)).set(stats.delivered as f64);
        gauge!(format!("{}.queue.dropped", self.prefix)).set(stats.dropped as f64);
        gauge!(format!("{}.queue.redelivered", self.prefix)).set(stats.redelivered as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
