//! Timestamped report assembly for the polling loop.
//!
//! The loop emits one report per probe iteration. Rendering beyond these
//! strings is the caller's responsibility.

use std::time::Duration;

use chrono::Local;

use crate::service::ServiceKind;

/// Format the timestamp prefix used by monitor reports.
pub fn timestamp_prefix() -> String {
    format!("[{}]:", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

/// Assemble one timestamped monitor report from a probe outcome.
pub fn monitor_report(
    name: &str,
    service: ServiceKind,
    interval: Duration,
    outcome: &str,
) -> String {
    format!(
        "{}\nService: {service}\nMonitoring: {name} at a time interval of {} seconds.\n{outcome}",
        timestamp_prefix(),
        interval.as_secs_f64()
    )
}
