//! Hand-built raw ICMP echo protocol.
//!
//! `packet` constructs and checksums echo-request packets; `ping` drives the
//! raw socket send/receive exchange.

pub mod packet;
mod ping;

pub use packet::{build_echo_request, checksum, echo_identifier, ICMP_HEADER_SIZE};
pub use ping::IcmpProbe;
