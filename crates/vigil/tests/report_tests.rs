//! Tests for report assembly.

use std::time::Duration;

use vigil::report::{monitor_report, timestamp_prefix};
use vigil::ServiceKind;

#[test]
fn test_timestamp_prefix_shape() {
    let prefix = timestamp_prefix();

    // "[YYYY-MM-DD HH:MM:SS]:"
    assert!(prefix.starts_with('['));
    assert!(prefix.ends_with("]:"));
    assert_eq!(prefix.len(), "[2026-01-01 00:00:00]:".len());
}

#[test]
fn test_monitor_report_contains_all_fields() {
    let report = monitor_report(
        "example.com",
        ServiceKind::Ntp,
        Duration::from_secs(60),
        "Server at example.com is up.",
    );

    assert!(report.contains("Service: NTP"));
    assert!(report.contains("Monitoring: example.com at a time interval of 60 seconds."));
    assert!(report.ends_with("Server at example.com is up."));
}

#[test]
fn test_monitor_report_renders_subsecond_intervals() {
    let report = monitor_report(
        "127.0.0.1",
        ServiceKind::Tcp,
        Duration::from_millis(500),
        "Port 80 on 127.0.0.1 is open.",
    );

    assert!(report.contains("at a time interval of 0.5 seconds."));
}
