//! Raw-socket ICMP echo send/receive.

use std::io;
use std::mem::MaybeUninit;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use socket2::{Domain, Protocol, Socket, Type};

use super::packet;
use crate::error::VigilError;
use crate::probe::Probe;
use crate::{DEFAULT_ICMP_PAYLOAD_SIZE, DEFAULT_ICMP_TTL};

/// Receive timeout for one echo exchange.
const PING_TIMEOUT: Duration = Duration::from_secs(1);

/// Reply buffer: IP header plus the echoed ICMP packet.
const REPLY_BUFFER_SIZE: usize = 1024;

/// Raw ICMP echo ("ping") probe.
pub struct IcmpProbe {
    host: String,
    ttl: u32,
    timeout: Duration,
    sequence: u16,
    payload_size: usize,
}

impl IcmpProbe {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ttl: DEFAULT_ICMP_TTL,
            timeout: PING_TIMEOUT,
            sequence: 1,
            payload_size: DEFAULT_ICMP_PAYLOAD_SIZE,
        }
    }

    /// Set the TTL for the outgoing request.
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the receive timeout for the reply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the sequence number carried in the echo request.
    pub fn with_sequence(mut self, sequence: u16) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the echo payload size. Must be even.
    pub fn with_payload_size(mut self, payload_size: usize) -> Self {
        self.payload_size = payload_size;
        self
    }

    /// Open a raw ICMP socket; fails without CAP_NET_RAW or equivalent.
    pub(crate) fn open_socket() -> Result<Socket, VigilError> {
        Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))
            .map_err(VigilError::RawSocket)
    }
}

/// One blocking echo exchange. Runs on the blocking pool so the raw-socket
/// receive does not stall the async polling loop.
///
/// Returns `Ok(None)` on receive timeout. Any ICMP packet arriving on the
/// socket within the timeout is taken as the reply: identifier, sequence,
/// and source are not matched against the request.
fn ping_blocking(
    host: &str,
    ttl: u32,
    timeout: Duration,
    sequence: u16,
    payload_size: usize,
) -> io::Result<Option<(IpAddr, f64)>> {
    let target = resolve_v4(host)?;

    let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
    socket.set_ttl(ttl)?;
    socket.set_read_timeout(Some(timeout))?;

    let request =
        packet::build_echo_request(packet::echo_identifier(), sequence, payload_size);
    // The port is irrelevant for raw ICMP; zero keeps the address well formed.
    let addr = SocketAddr::new(IpAddr::V4(target), 0);
    socket.send_to(&request, &addr.into())?;
    let start = Instant::now();

    let mut buf = [MaybeUninit::<u8>::uninit(); REPLY_BUFFER_SIZE];
    match socket.recv_from(&mut buf) {
        Ok((_len, from)) => {
            let rtt_ms = start.elapsed().as_secs_f64() * 1000.0;
            let from_ip = from
                .as_socket()
                .map(|s| s.ip())
                .unwrap_or(IpAddr::V4(target));
            Ok(Some((from_ip, rtt_ms)))
        }
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Resolve the target to its first IPv4 address.
fn resolve_v4(host: &str) -> io::Result<Ipv4Addr> {
    for addr in (host, 0).to_socket_addrs()? {
        if let SocketAddr::V4(v4) = addr {
            return Ok(*v4.ip());
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no IPv4 address for {host}"),
    ))
}

#[async_trait]
impl Probe for IcmpProbe {
    async fn check(&self) -> String {
        let host = self.host.clone();
        let (ttl, timeout, sequence, payload_size) =
            (self.ttl, self.timeout, self.sequence, self.payload_size);

        let outcome = tokio::task::spawn_blocking(move || {
            ping_blocking(&host, ttl, timeout, sequence, payload_size)
        })
        .await;

        match outcome {
            Ok(Ok(Some((from, rtt_ms)))) => {
                if from.to_string() == self.host {
                    format!("Successfully pinged {from}, with a time of {rtt_ms:.2}ms")
                } else {
                    format!(
                        "Successfully pinged {} at {from}, with a time of {rtt_ms:.2}ms",
                        self.host
                    )
                }
            }
            Ok(Ok(None)) => format!("Failed to ping {}", self.host),
            Ok(Err(e)) => format!("Failed to ping {}: {e}", self.host),
            Err(e) => format!("Failed to ping {}: {e}", self.host),
        }
    }
}
