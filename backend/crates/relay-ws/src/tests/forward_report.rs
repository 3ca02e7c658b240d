use crate::ForwardReport;

use tokio::time::{Duration, timeout};

const PERIOD: Duration = Duration::from_millis(30);
const WAIT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn given_forwarded_messages_when_interval_ends_then_count_reported_and_reset() {
    // Given
    let mut report = ForwardReport::new(PERIOD);
    report.record();
    report.record();
    report.record();

    // When
    let first = timeout(WAIT, report.next_report()).await.unwrap();

    // Then
    assert_eq!(first, 3);
    assert_eq!(report.current(), 0);
}

#[tokio::test]
async fn given_consecutive_intervals_when_reported_then_each_counts_only_its_own() {
    // Given
    let mut report = ForwardReport::new(PERIOD);
    report.record();
    report.record();
    let first = timeout(WAIT, report.next_report()).await.unwrap();

    // When
    report.record();
    let second = timeout(WAIT, report.next_report()).await.unwrap();
    let third = timeout(WAIT, report.next_report()).await.unwrap();

    // Then
    assert_eq!((first, second, third), (2, 1, 0));
    assert_eq!(report.total(), 3);
}

#[tokio::test]
async fn given_new_report_when_polled_early_then_waits_a_full_period() {
    let mut report = ForwardReport::new(Duration::from_secs(60));
    report.record();

    let early = timeout(Duration::from_millis(20), report.next_report()).await;

    assert!(early.is_err());
    assert_eq!(report.current(), 1);
}
