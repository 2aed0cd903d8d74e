//! EchoServer definition and lifecycle.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{tcp, udp};
use crate::error::VigilError;
use crate::service::ServiceKind;

/// Per-iteration blocking timeout on the accept/receive wait; its expiry is
/// the loop's cancellation checkpoint.
const ACCEPT_TIMEOUT: Duration = Duration::from_secs(10);

/// A minimal loopback listener: TCP echo or UDP acknowledge.
///
/// One accept/receive loop per server; exchanges are strictly serialized,
/// no concurrent clients are served.
pub struct EchoServer {
    name: String,
    bind_addr: IpAddr,
    port: u16,
    service: ServiceKind,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl EchoServer {
    /// TCP echo server on 127.0.0.1. Port 0 binds an ephemeral port; the
    /// `port` accessor reports the bound port after activation.
    pub fn tcp(name: impl Into<String>, port: u16) -> Self {
        Self::with_service(name.into(), ServiceKind::Tcp, port)
    }

    /// UDP acknowledge server on 127.0.0.1.
    pub fn udp(name: impl Into<String>, port: u16) -> Self {
        Self::with_service(name.into(), ServiceKind::Udp, port)
    }

    fn with_service(name: String, service: ServiceKind, port: u16) -> Self {
        Self {
            name,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            service,
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// Custom name of the server.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound port of the server.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Service variant the server answers.
    pub fn service(&self) -> ServiceKind {
        self.service
    }

    /// Whether the serve loop is currently running.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Bind the socket and start the serve loop on its own task.
    ///
    /// Bind failures are fatal and surface here; network failures inside
    /// the loop are logged and survived.
    pub async fn activate(&mut self) -> Result<(), VigilError> {
        if self.handle.is_some() {
            return Err(VigilError::AlreadyActive(self.name.clone()));
        }

        self.cancel = CancellationToken::new();
        let addr = SocketAddr::new(self.bind_addr, self.port);

        let handle = if self.service == ServiceKind::Tcp {
            let listener = TcpListener::bind(addr)
                .await
                .map_err(|source| VigilError::Bind { addr, source })?;
            if let Ok(local) = listener.local_addr() {
                self.port = local.port();
            }
            tokio::spawn(tcp::serve(
                self.name.clone(),
                listener,
                ACCEPT_TIMEOUT,
                self.cancel.clone(),
            ))
        } else {
            let socket = UdpSocket::bind(addr)
                .await
                .map_err(|source| VigilError::Bind { addr, source })?;
            if let Ok(local) = socket.local_addr() {
                self.port = local.port();
            }
            tokio::spawn(udp::serve(
                self.name.clone(),
                socket,
                ACCEPT_TIMEOUT,
                self.cancel.clone(),
            ))
        };

        self.handle = Some(handle);
        Ok(())
    }

    /// Stop the serve loop and wait for it to exit. A no-op when the server
    /// was never activated.
    pub async fn deactivate(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel.cancel();
            let _ = handle.await;
        }
    }
}
