//! A self-test monitoring loop.
//!
//! Starts a TCP echo server and a UDP acknowledge server on loopback, then
//! points client-mode monitors at them for a few iterations.

use std::time::Duration;

use anyhow::Result;
use vigil::{EchoServer, Monitor};

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    // Port 0 picks an ephemeral port; the accessor reports the bound one.
    let mut tcp_server = EchoServer::tcp("local-tcp-echo", 0);
    tcp_server.activate().await?;

    let mut udp_server = EchoServer::udp("local-udp-ack", 0);
    udp_server.activate().await?;

    let mut tcp_monitor = Monitor::tcp_echo_client(
        "127.0.0.1",
        Duration::from_secs(2),
        tcp_server.port(),
        "ping",
    );
    tcp_monitor.activate()?;

    let mut udp_monitor = Monitor::udp_echo_client(
        "127.0.0.1",
        Duration::from_secs(2),
        udp_server.port(),
        "ping",
    );
    udp_monitor.activate()?;

    tokio::time::sleep(Duration::from_secs(7)).await;

    tcp_monitor.deactivate().await;
    udp_monitor.deactivate().await;
    tcp_server.deactivate().await;
    udp_server.deactivate().await;

    Ok(())
}
