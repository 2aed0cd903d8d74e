//! TCP/UDP port checks and the echo-test clients.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;

use super::Probe;
use crate::ECHO_BUFFER_SIZE;

/// Timeout shared by the TCP connect and UDP reply waits.
const PORT_CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors that mean the port is closed rather than the check being broken.
fn is_unreachable(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::AddrNotAvailable
    )
}

/// Attempts a TCP connection to host:port and classifies the result.
pub struct TcpPortProbe {
    host: String,
    port: u16,
}

impl TcpPortProbe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

#[async_trait]
impl Probe for TcpPortProbe {
    async fn check(&self) -> String {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match timeout(PORT_CHECK_TIMEOUT, connect).await {
            Ok(Ok(_stream)) => format!("Port {} on {} is open.", self.port, self.host),
            Err(_) => format!("Port {} on {} timed out.", self.port, self.host),
            Ok(Err(e)) if is_unreachable(&e) => {
                format!("Port {} on {} is closed or not reachable.", self.port, self.host)
            }
            Ok(Err(e)) => format!(
                "Failed to check port {} on {} due to an error: {e}",
                self.port, self.host
            ),
        }
    }
}

/// Sends an empty datagram to host:port and waits for any reply.
///
/// UDP gives no positive confirmation of a listener, so the reading is
/// inverted: a reply (our acknowledge servers always answer) means something
/// owns the port and the probe reports "closed"; silence until the timeout
/// means "open or no response".
pub struct UdpPortProbe {
    host: String,
    port: u16,
}

impl UdpPortProbe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }

    async fn exchange(&self) -> io::Result<Option<usize>> {
        // Unconnected on purpose: a connected socket would surface the ICMP
        // port-unreachable for a closed port as a receive error.
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.send_to(&[], (self.host.as_str(), self.port)).await?;

        let mut buf = [0u8; ECHO_BUFFER_SIZE];
        match timeout(PORT_CHECK_TIMEOUT, socket.recv_from(&mut buf)).await {
            Ok(Ok((n, _from))) => Ok(Some(n)),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(None),
        }
    }
}

#[async_trait]
impl Probe for UdpPortProbe {
    async fn check(&self) -> String {
        match self.exchange().await {
            Ok(Some(_)) => format!("Port {} on {} is closed.", self.port, self.host),
            Ok(None) => format!(
                "Port {} on {} is open or no response received.",
                self.port, self.host
            ),
            Err(e) => format!(
                "Failed to check UDP port {} on {} due to an error: {e}",
                self.port, self.host
            ),
        }
    }
}

/// Echo-test client for a TCP echo server: sends the configured message and
/// reports what came back.
pub struct TcpEchoClient {
    host: String,
    port: u16,
    message: String,
}

impl TcpEchoClient {
    pub fn new(host: impl Into<String>, port: u16, message: impl Into<String>) -> Self {
        Self { host: host.into(), port, message: message.into() }
    }

    async fn exchange(&self) -> crate::Result<String> {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let mut stream = timeout(PORT_CHECK_TIMEOUT, connect).await??;
        stream.write_all(self.message.as_bytes()).await?;

        let mut buf = [0u8; ECHO_BUFFER_SIZE];
        let n = timeout(PORT_CHECK_TIMEOUT, stream.read(&mut buf)).await??;
        Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
    }
}

#[async_trait]
impl Probe for TcpEchoClient {
    async fn check(&self) -> String {
        match self.exchange().await {
            Ok(response) => format!(
                "TCP client sent {} to {} at port {}, and received the following response: {response}",
                self.message, self.host, self.port
            ),
            Err(e) => format!(
                "TCP client failed to exchange {} with {} at port {}: {e}",
                self.message, self.host, self.port
            ),
        }
    }
}

/// Echo-test client for a UDP acknowledge server.
pub struct UdpEchoClient {
    host: String,
    port: u16,
    message: String,
}

impl UdpEchoClient {
    pub fn new(host: impl Into<String>, port: u16, message: impl Into<String>) -> Self {
        Self { host: host.into(), port, message: message.into() }
    }

    async fn exchange(&self) -> crate::Result<String> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket
            .send_to(self.message.as_bytes(), (self.host.as_str(), self.port))
            .await?;

        let mut buf = [0u8; ECHO_BUFFER_SIZE];
        let (n, _from) = timeout(PORT_CHECK_TIMEOUT, socket.recv_from(&mut buf)).await??;
        Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
    }
}

#[async_trait]
impl Probe for UdpEchoClient {
    async fn check(&self) -> String {
        match self.exchange().await {
            Ok(response) => format!(
                "UDP client sent {} to {} at port {}, and received the following response: {response}",
                self.message, self.host, self.port
            ),
            Err(e) => format!(
                "UDP client failed to exchange {} with {} at port {}: {e}",
                self.message, self.host, self.port
            ),
        }
    }
}
