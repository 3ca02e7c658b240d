use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Report interval constraints (seconds)
pub const MIN_REPORT_INTERVAL_SECS: u64 = 1;
pub const MAX_REPORT_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 60;

// Idle notice constraints (seconds)
pub const MIN_IDLE_NOTICE_SECS: u64 = 1;
pub const MAX_IDLE_NOTICE_SECS: u64 = 600;
pub const DEFAULT_IDLE_NOTICE_SECS: u64 = 5;

/// Streaming session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// How often each session logs and resets its forwarded-message counter
    pub report_interval_secs: u64,
    /// Quiet period after which a session logs that nothing arrived
    pub idle_notice_secs: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            idle_notice_secs: DEFAULT_IDLE_NOTICE_SECS,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.report_interval_secs < MIN_REPORT_INTERVAL_SECS
            || self.report_interval_secs > MAX_REPORT_INTERVAL_SECS
        {
            return Err(ConfigError::stream(format!(
                "stream.report_interval_secs must be {}-{}, got {}",
                MIN_REPORT_INTERVAL_SECS, MAX_REPORT_INTERVAL_SECS, self.report_interval_secs
            )));
        }

        if self.idle_notice_secs < MIN_IDLE_NOTICE_SECS
            || self.idle_notice_secs > MAX_IDLE_NOTICE_SECS
        {
            return Err(ConfigError::stream(format!(
                "stream.idle_notice_secs must be {}-{}, got {}",
                MIN_IDLE_NOTICE_SECS, MAX_IDLE_NOTICE_SECS, self.idle_notice_secs
            )));
        }

        Ok(())
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn idle_notice(&self) -> Duration {
        Duration::from_secs(self.idle_notice_secs)
    }
}
