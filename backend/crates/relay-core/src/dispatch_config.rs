use crate::{CoreError, Result as CoreResult};

use std::time::Duration;

pub const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_EMPTY_INTERVAL: Duration = Duration::from_millis(10);

/// Timing for the background dispatcher
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Longest wait while no subscription is registered
    pub idle_interval: Duration,
    /// Longest wait while subscriptions exist but the buffer is empty
    pub empty_interval: Duration,
}

impl DispatchConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.idle_interval.is_zero() {
            return Err(CoreError::interval("idle_interval"));
        }
        if self.empty_interval.is_zero() {
            return Err(CoreError::interval("empty_interval"));
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            idle_interval: DEFAULT_IDLE_INTERVAL,
            empty_interval: DEFAULT_EMPTY_INTERVAL,
        }
    }
}
