use crate::SessionConfig;

use relay_config::StreamConfig;

use std::time::Duration;

#[test]
fn given_stream_config_when_converted_then_durations_match() {
    // Given
    let stream = StreamConfig {
        report_interval_secs: 30,
        idle_notice_secs: 2,
    };

    // When
    let config = SessionConfig::from(&stream);

    // Then
    assert_eq!(config.report_interval, Duration::from_secs(30));
    assert_eq!(config.idle_notice, Duration::from_secs(2));
}

#[test]
fn given_default_when_created_then_matches_stream_defaults() {
    let config = SessionConfig::default();
    assert_eq!(config.report_interval, Duration::from_secs(60));
    assert_eq!(config.idle_notice, Duration::from_secs(5));
}
