use relay_config::StreamConfig;

use std::time::Duration;

/// Timing of a streaming session
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Period of the forwarded-message report
    pub report_interval: Duration,
    /// Quiet period before the "no message received" notice
    pub idle_notice: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&StreamConfig::default())
    }
}

impl From<&StreamConfig> for SessionConfig {
    fn from(config: &StreamConfig) -> Self {
        Self {
            report_interval: config.report_interval(),
            idle_notice: config.idle_notice(),
        }
    }
}
