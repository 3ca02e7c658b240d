use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Capacity constraints
pub const MIN_CAPACITY: usize = 1;
pub const MAX_CAPACITY: usize = 1_000_000;
pub const DEFAULT_CAPACITY: usize = 100;

// Dispatcher wait constraints (milliseconds)
pub const MIN_POLL_MS: u64 = 1;
pub const MAX_POLL_MS: u64 = 60_000;
pub const DEFAULT_IDLE_POLL_MS: u64 = 1000;
pub const DEFAULT_EMPTY_POLL_MS: u64 = 10;

// Backlog drain constraints (seconds)
pub const MIN_DRAIN_INTERVAL_SECS: u64 = 1;
pub const MAX_DRAIN_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_DRAIN_INTERVAL_SECS: u64 = 1;

/// Broadcast queue settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Buffer capacity, also the capacity of every session's delivery channel
    pub capacity: usize,
    /// Dispatcher wait while no session is subscribed
    pub idle_poll_ms: u64,
    /// Dispatcher wait while the buffer is empty
    pub empty_poll_ms: u64,
    /// Discard the backlog while no session is attached
    pub drain_when_disconnected: bool,
    pub drain_interval_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            idle_poll_ms: DEFAULT_IDLE_POLL_MS,
            empty_poll_ms: DEFAULT_EMPTY_POLL_MS,
            drain_when_disconnected: false,
            drain_interval_secs: DEFAULT_DRAIN_INTERVAL_SECS,
        }
    }
}

impl QueueConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.capacity < MIN_CAPACITY || self.capacity > MAX_CAPACITY {
            return Err(ConfigError::queue(format!(
                "queue.capacity must be {}-{}, got {}",
                MIN_CAPACITY, MAX_CAPACITY, self.capacity
            )));
        }

        for (name, value) in [
            ("idle_poll_ms", self.idle_poll_ms),
            ("empty_poll_ms", self.empty_poll_ms),
        ] {
            if !(MIN_POLL_MS..=MAX_POLL_MS).contains(&value) {
                return Err(ConfigError::queue(format!(
                    "queue.{} must be {}-{}, got {}",
                    name, MIN_POLL_MS, MAX_POLL_MS, value
                )));
            }
        }

        if self.drain_interval_secs < MIN_DRAIN_INTERVAL_SECS
            || self.drain_interval_secs > MAX_DRAIN_INTERVAL_SECS
        {
            return Err(ConfigError::queue(format!(
                "queue.drain_interval_secs must be {}-{}, got {}",
                MIN_DRAIN_INTERVAL_SECS, MAX_DRAIN_INTERVAL_SECS, self.drain_interval_secs
            )));
        }

        Ok(())
    }

    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }

    pub fn empty_poll(&self) -> Duration {
        Duration::from_millis(self.empty_poll_ms)
    }

    pub fn drain_interval(&self) -> Duration {
        Duration::from_secs(self.drain_interval_secs)
    }
}
