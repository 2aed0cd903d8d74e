//! NTP server probe.
//!
//! Sends a minimal 48-byte NTP version 3 client request over UDP and
//! reports the server's transmit timestamp rendered in local time.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use tokio::net::UdpSocket;
use tokio::time::timeout;

use super::Probe;

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970).
const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

/// Receive timeout for the NTP exchange.
const NTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Header-only SNTP packet, no authenticator.
const NTP_PACKET_SIZE: usize = 48;

/// Offset of the transmit timestamp within the packet.
const TX_TIMESTAMP_OFFSET: usize = 40;

/// Asks an NTP server for the time and reports its transmit timestamp.
pub struct NtpProbe {
    server: String,
}

impl NtpProbe {
    pub fn new(server: impl Into<String>) -> Self {
        Self { server: server.into() }
    }

    async fn request(&self) -> crate::Result<String> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect((self.server.as_str(), 123)).await?;

        // LI = 0, VN = 3, Mode = 3 (client); every other field stays zero.
        let mut request = [0u8; NTP_PACKET_SIZE];
        request[0] = (3 << 3) | 3;
        socket.send(&request).await?;

        let mut reply = [0u8; NTP_PACKET_SIZE];
        let n = timeout(NTP_TIMEOUT, socket.recv(&mut reply)).await??;
        if n < NTP_PACKET_SIZE {
            anyhow::bail!("short NTP reply: {n} bytes");
        }

        let ntp_secs = u32::from_be_bytes(
            reply[TX_TIMESTAMP_OFFSET..TX_TIMESTAMP_OFFSET + 4].try_into()?,
        ) as u64;
        let unix_secs = ntp_secs
            .checked_sub(NTP_UNIX_OFFSET)
            .ok_or_else(|| anyhow::anyhow!("NTP transmit timestamp predates the Unix epoch"))?;
        let tx_time = Local
            .timestamp_opt(unix_secs as i64, 0)
            .single()
            .ok_or_else(|| anyhow::anyhow!("NTP transmit timestamp out of range"))?;

        // ctime-style rendering, e.g. "Mon Aug 24 12:31:05 2026".
        Ok(tx_time.format("%a %b %e %H:%M:%S %Y").to_string())
    }
}

#[async_trait]
impl Probe for NtpProbe {
    async fn check(&self) -> String {
        match self.request().await {
            Ok(tx_time) => {
                format!("Server at {} is up. Response time: {tx_time}", self.server)
            }
            Err(_) => format!("Couldn't reach server at {}", self.server),
        }
    }
}
