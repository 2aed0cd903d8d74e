//! TCP echo serve loop.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ECHO_BUFFER_SIZE;

/// Accept loop: one connection at a time, echoing back exactly the bytes
/// read, then dropping the connection.
///
/// The accept wait is bounded by `accept_timeout` so the loop re-checks the
/// cancellation token even when no client ever connects; a timeout there is
/// a checkpoint, not an error.
pub(crate) async fn serve(
    name: String,
    listener: TcpListener,
    accept_timeout: Duration,
    cancel: CancellationToken,
) {
    info!("TCP server {name}: listening for incoming connections");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = timeout(accept_timeout, listener.accept()) => match accepted {
                Ok(Ok((mut stream, peer))) => {
                    debug!("TCP server {name}: connection from {peer}");
                    if let Err(e) = echo_once(&mut stream).await {
                        warn!("TCP server {name}: exchange with {peer} failed: {e}");
                    }
                    debug!("TCP server {name}: connection with {peer} closed");
                }
                Ok(Err(e)) => warn!("TCP server {name}: accept failed: {e}"),
                Err(_) => {}
            },
        }
    }

    info!("TCP server {name}: server socket closed");
}

async fn echo_once(stream: &mut TcpStream) -> io::Result<()> {
    let mut buf = [0u8; ECHO_BUFFER_SIZE];
    let n = stream.read(&mut buf).await?;
    stream.write_all(&buf[..n]).await?;
    Ok(())
}
