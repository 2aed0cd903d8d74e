//! Loopback echo servers used as monitoring targets.

mod core;
mod tcp;
mod udp;

pub use self::core::EchoServer;
pub use udp::UDP_ACK;
