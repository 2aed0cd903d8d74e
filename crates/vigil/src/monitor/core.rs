//! Monitor definition and lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::run;
use crate::error::VigilError;
use crate::probe::dns::RecordType;
use crate::probe::{
    DnsProbe, HttpProbe, HttpsProbe, IcmpProbe, NtpProbe, Probe, TcpEchoClient, TcpPortProbe,
    UdpEchoClient, UdpPortProbe,
};
use crate::service::ServiceKind;

/// A monitored target: a probe driven by a cancellable polling loop on its
/// own task.
pub struct Monitor {
    pub(crate) name: String,
    pub(crate) service: ServiceKind,

    /// Interval in milliseconds, shared with the polling loop. The loop
    /// reads it once per iteration, so a concurrent `set_interval` takes
    /// effect at the next iteration, never during the sleep in progress.
    pub(crate) interval_ms: Arc<AtomicU64>,

    pub(crate) probe: Arc<dyn Probe>,
    pub(crate) cancel: CancellationToken,
    pub(crate) handle: Option<JoinHandle<()>>,

    // Variant-specific metadata exposed through the accessors.
    pub(crate) port: Option<u16>,
    pub(crate) query: Option<String>,
    pub(crate) record_type: Option<RecordType>,
    pub(crate) echo_message: Option<String>,
}

impl Monitor {
    fn with_probe(
        name: String,
        service: ServiceKind,
        interval: Duration,
        probe: Arc<dyn Probe>,
    ) -> Self {
        Self {
            name,
            service,
            interval_ms: Arc::new(AtomicU64::new(interval.as_millis() as u64)),
            probe,
            cancel: CancellationToken::new(),
            handle: None,
            port: None,
            query: None,
            record_type: None,
            echo_message: None,
        }
    }

    /// HTTP endpoint monitor; `name` is the URL to probe.
    pub fn http(name: impl Into<String>, interval: Duration) -> Self {
        let name = name.into();
        let probe = Arc::new(HttpProbe::new(name.clone()));
        Self::with_probe(name, ServiceKind::Http, interval, probe)
    }

    /// HTTPS endpoint monitor; `name` is the URL to probe.
    pub fn https(name: impl Into<String>, interval: Duration) -> Self {
        let name = name.into();
        let probe = Arc::new(HttpsProbe::new(name.clone()));
        Self::with_probe(name, ServiceKind::Https, interval, probe)
    }

    /// ICMP echo monitor; `name` is a hostname or IPv4 address.
    pub fn icmp(name: impl Into<String>, interval: Duration) -> Self {
        let name = name.into();
        let probe = Arc::new(IcmpProbe::new(name.clone()));
        Self::with_probe(name, ServiceKind::Icmp, interval, probe)
    }

    /// DNS server monitor; `name` is the nameserver to check.
    pub fn dns(
        name: impl Into<String>,
        interval: Duration,
        query: impl Into<String>,
        record_type: RecordType,
    ) -> Self {
        let name = name.into();
        let query = query.into();
        let probe = Arc::new(DnsProbe::new(name.clone(), query.clone(), record_type));
        let mut monitor = Self::with_probe(name, ServiceKind::Dns, interval, probe);
        monitor.query = Some(query);
        monitor.record_type = Some(record_type);
        monitor
    }

    /// NTP server monitor.
    pub fn ntp(name: impl Into<String>, interval: Duration) -> Self {
        let name = name.into();
        let probe = Arc::new(NtpProbe::new(name.clone()));
        Self::with_probe(name, ServiceKind::Ntp, interval, probe)
    }

    /// TCP port monitor.
    pub fn tcp(name: impl Into<String>, interval: Duration, port: u16) -> Self {
        let name = name.into();
        let probe = Arc::new(TcpPortProbe::new(name.clone(), port));
        let mut monitor = Self::with_probe(name, ServiceKind::Tcp, interval, probe);
        monitor.port = Some(port);
        monitor
    }

    /// UDP port monitor.
    pub fn udp(name: impl Into<String>, interval: Duration, port: u16) -> Self {
        let name = name.into();
        let probe = Arc::new(UdpPortProbe::new(name.clone(), port));
        let mut monitor = Self::with_probe(name, ServiceKind::Udp, interval, probe);
        monitor.port = Some(port);
        monitor
    }

    /// TCP monitor in echo-client mode: each iteration exchanges `message`
    /// with an echo server at name:port instead of checking the port.
    pub fn tcp_echo_client(
        name: impl Into<String>,
        interval: Duration,
        port: u16,
        message: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let message = message.into();
        let probe = Arc::new(TcpEchoClient::new(name.clone(), port, message.clone()));
        let mut monitor = Self::with_probe(name, ServiceKind::Tcp, interval, probe);
        monitor.port = Some(port);
        monitor.echo_message = Some(message);
        monitor
    }

    /// UDP monitor in echo-client mode.
    pub fn udp_echo_client(
        name: impl Into<String>,
        interval: Duration,
        port: u16,
        message: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let message = message.into();
        let probe = Arc::new(UdpEchoClient::new(name.clone(), port, message.clone()));
        let mut monitor = Self::with_probe(name, ServiceKind::Udp, interval, probe);
        monitor.port = Some(port);
        monitor.echo_message = Some(message);
        monitor
    }

    /// Start the polling loop on its own task and return immediately.
    ///
    /// Setup problems fail loud here instead of becoming outcome strings:
    /// an ICMP monitor verifies it can open a raw socket before the loop
    /// starts, so missing privilege surfaces to the caller.
    pub fn activate(&mut self) -> Result<(), VigilError> {
        if self.handle.is_some() {
            return Err(VigilError::AlreadyActive(self.name.clone()));
        }
        if self.service == ServiceKind::Icmp {
            // Capability check only; each probe iteration opens its own socket.
            IcmpProbe::open_socket()?;
        }

        self.cancel = CancellationToken::new();
        self.handle = Some(tokio::spawn(run::monitor_loop(
            self.name.clone(),
            self.service,
            Arc::clone(&self.interval_ms),
            Arc::clone(&self.probe),
            self.cancel.clone(),
        )));
        Ok(())
    }

    /// Stop the polling loop and wait for it to exit.
    ///
    /// Cancellation is observed between iterations only, so this can wait
    /// out the remainder of the current sleep plus one in-flight probe.
    /// A no-op if the monitor was never activated.
    pub async fn deactivate(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel.cancel();
            let _ = handle.await;
        }
    }

    /// Run the probe once, outside the polling loop.
    pub async fn check_now(&self) -> String {
        self.probe.check().await
    }

    /// Replace the polling interval. The running loop picks the new value up
    /// at its next iteration, not during the sleep already in progress.
    pub fn set_interval(&self, interval: Duration) {
        self.interval_ms.store(interval.as_millis() as u64, Ordering::Relaxed);
    }
}
