//! Setup error types for monitors and echo servers.
//!
//! Transient network failures never show up here: probes fold them into the
//! outcome strings they return. These errors cover setup problems that must
//! surface to the caller out of `activate()`.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// A fatal setup failure raised during activation.
#[derive(Debug, Error)]
pub enum VigilError {
    /// Opening the raw ICMP socket failed, typically for lack of privilege.
    #[error("failed to open raw ICMP socket: {0}")]
    RawSocket(#[source] io::Error),

    /// Binding the echo server socket failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The entity already has a running background task.
    #[error("{0} is already active")]
    AlreadyActive(String),
}
