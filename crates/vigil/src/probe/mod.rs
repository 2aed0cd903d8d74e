//! Protocol probe implementations.
//!
//! Each probe performs one health check against its target and returns a
//! descriptive outcome string. A check must never take down the polling loop
//! that drives it, so transient network failures are folded into the
//! returned string instead of being propagated.

use async_trait::async_trait;

pub mod dns;
pub mod http;
pub mod icmp;
pub mod ntp;
pub mod port;

pub use dns::DnsProbe;
pub use http::{HttpProbe, HttpsProbe};
pub use icmp::IcmpProbe;
pub use ntp::NtpProbe;
pub use port::{TcpEchoClient, TcpPortProbe, UdpEchoClient, UdpPortProbe};

/// A single protocol health check.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Run one check and describe the outcome.
    async fn check(&self) -> String;
}
