//! Vigil - interval-driven network service monitoring.
//!
//! This library provides monitors that probe network endpoints (HTTP, HTTPS,
//! ICMP, DNS, NTP, TCP, UDP) on independent timers and report timestamped
//! status, plus minimal TCP/UDP echo servers usable as self-test targets.

pub mod error;
pub mod monitor;
pub mod probe;
pub mod report;
pub mod server;
pub mod service;

// Re-export main types
pub use error::VigilError;
pub use monitor::Monitor;
pub use probe::dns::RecordType;
pub use probe::Probe;
pub use server::{EchoServer, UDP_ACK};
pub use service::ServiceKind;

/// Re-export common error types
pub use anyhow;

/// Vigil result type using anyhow for error handling
pub type Result<T> = anyhow::Result<T>;

/// Default TTL set on the raw socket for ICMP echo requests
pub const DEFAULT_ICMP_TTL: u32 = 64;

/// Default ICMP echo payload size in bytes
pub const DEFAULT_ICMP_PAYLOAD_SIZE: usize = 192;

/// Receive buffer size shared by the echo servers and port probes
pub const ECHO_BUFFER_SIZE: usize = 1024;
