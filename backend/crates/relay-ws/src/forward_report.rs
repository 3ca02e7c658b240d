use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Messages a session forwarded, reported and reset once per interval.
///
/// `next_report` is cancel-safe, so it can sit in a `select!` loop next to
/// the branch that calls `record`.
pub struct ForwardReport {
    ticker: Interval,
    period: Duration,
    forwarded: u64,
    total: u64,
}

impl ForwardReport {
    /// The first report is due one full `period` from now
    pub fn new(period: Duration) -> Self {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            ticker,
            period,
            forwarded: 0,
            total: 0,
        }
    }

    pub fn record(&mut self) {
        self.forwarded += 1;
        self.total += 1;
    }

    /// Wait for the interval to end, then return its count and start over at zero
    pub async fn next_report(&mut self) -> u64 {
        self.ticker.tick().await;
        std::mem::take(&mut self.forwarded)
    }

    /// Count in the interval still running
    pub fn current(&self) -> u64 {
        self.forwarded
    }

    /// Count over the whole session
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
