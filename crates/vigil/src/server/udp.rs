//! UDP acknowledge serve loop.

use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ECHO_BUFFER_SIZE;

/// Reply sent for every received datagram. Unlike the TCP server, the UDP
/// server acknowledges instead of echoing the payload.
pub const UDP_ACK: &str = "Message received";

/// Receive loop: one datagram at a time, answered with [`UDP_ACK`].
///
/// The receive wait is bounded by `recv_timeout`, which doubles as the
/// cancellation checkpoint.
pub(crate) async fn serve(
    name: String,
    socket: UdpSocket,
    recv_timeout: Duration,
    cancel: CancellationToken,
) {
    info!("UDP server {name}: ready to receive messages");
    let mut buf = [0u8; ECHO_BUFFER_SIZE];

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            received = timeout(recv_timeout, socket.recv_from(&mut buf)) => match received {
                Ok(Ok((n, peer))) => {
                    debug!("UDP server {name}: received {n} bytes from {peer}");
                    if let Err(e) = socket.send_to(UDP_ACK.as_bytes(), peer).await {
                        warn!("UDP server {name}: reply to {peer} failed: {e}");
                    }
                }
                Ok(Err(e)) => warn!("UDP server {name}: receive failed: {e}"),
                Err(_) => {}
            },
        }
    }

    info!("UDP server {name}: server socket closed");
}
