//! Accessor methods for Monitor.

use std::sync::atomic::Ordering;
use std::time::Duration;

use super::core::Monitor;
use crate::probe::dns::RecordType;
use crate::service::ServiceKind;

impl Monitor {
    /// Name of the monitored target (hostname, IP, or URL).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Service variant this monitor checks.
    pub fn service(&self) -> ServiceKind {
        self.service
    }

    /// Current polling interval.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    /// Whether the polling loop is currently running.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Target port (TCP/UDP monitors).
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Query name (DNS monitors).
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Record type (DNS monitors).
    pub fn record_type(&self) -> Option<RecordType> {
        self.record_type
    }

    /// Echo message (TCP/UDP monitors in client mode).
    pub fn echo_message(&self) -> Option<&str> {
        self.echo_message.as_deref()
    }
}
