//! Integration tests for the monitor lifecycle and polling loop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use vigil::{EchoServer, Monitor, RecordType, ServiceKind};

/// Accept connections forever, counting each one. Stands in for an echo
/// server when a test needs to observe how often a monitor probes.
async fn counting_listener(count: Arc<AtomicUsize>) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((stream, _peer)) = listener.accept().await {
            count.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });
    port
}

#[test]
fn test_monitor_accessors() {
    let monitor = Monitor::dns(
        "8.8.8.8",
        Duration::from_secs(30),
        "example.com",
        RecordType::AAAA,
    );

    assert_eq!(monitor.name(), "8.8.8.8");
    assert_eq!(monitor.service(), ServiceKind::Dns);
    assert_eq!(monitor.interval(), Duration::from_secs(30));
    assert_eq!(monitor.query(), Some("example.com"));
    assert_eq!(monitor.record_type(), Some(RecordType::AAAA));
    assert_eq!(monitor.port(), None);
    assert_eq!(monitor.echo_message(), None);
    assert!(!monitor.is_active());
}

#[test]
fn test_client_mode_monitor_carries_message_and_port() {
    let monitor = Monitor::tcp_echo_client("127.0.0.1", Duration::from_secs(5), 9999, "ping");

    assert_eq!(monitor.service(), ServiceKind::Tcp);
    assert_eq!(monitor.port(), Some(9999));
    assert_eq!(monitor.echo_message(), Some("ping"));
}

#[test]
fn test_port_monitor_has_no_echo_message() {
    let monitor = Monitor::udp("127.0.0.1", Duration::from_secs(5), 9999);

    assert_eq!(monitor.port(), Some(9999));
    assert_eq!(monitor.echo_message(), None);
}

#[tokio::test]
async fn test_deactivate_without_activate_is_noop() {
    let mut monitor = Monitor::http("http://example.com", Duration::from_secs(5));
    monitor.deactivate().await;
    assert!(!monitor.is_active());
}

#[tokio::test]
async fn test_lifecycle_against_echo_server() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut server = EchoServer::tcp("lifecycle-target", 0);
    server.activate().await.expect("bind failed");

    let mut monitor = Monitor::tcp_echo_client(
        "127.0.0.1",
        Duration::from_millis(100),
        server.port(),
        "ping",
    );
    monitor.activate().expect("activate failed");
    assert!(monitor.is_active());

    // Let a few iterations run, then tear down; deactivate must not return
    // before the loop task has exited.
    tokio::time::sleep(Duration::from_millis(300)).await;
    monitor.deactivate().await;
    assert!(!monitor.is_active());

    server.deactivate().await;
}

#[tokio::test]
async fn test_activate_twice_is_rejected() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut server = EchoServer::tcp("double-activate", 0);
    server.activate().await.expect("bind failed");

    let mut monitor = Monitor::tcp("127.0.0.1", Duration::from_millis(100), server.port());
    monitor.activate().expect("activate failed");
    assert!(monitor.activate().is_err());

    monitor.deactivate().await;
    server.deactivate().await;
}

#[tokio::test]
async fn test_set_interval_takes_effect_at_next_iteration() {
    let _ = tracing_subscriber::fmt::try_init();

    let count = Arc::new(AtomicUsize::new(0));
    let port = counting_listener(Arc::clone(&count)).await;

    let mut monitor = Monitor::tcp("127.0.0.1", Duration::from_millis(25), port);
    monitor.activate().expect("activate failed");

    // On the short interval the loop probes many times.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(count.load(Ordering::SeqCst) >= 4, "loop barely ran");

    monitor.set_interval(Duration::from_secs(2));
    assert_eq!(monitor.interval(), Duration::from_secs(2));

    // The iteration already sleeping on the old interval may still fire
    // once; give it time to drain, then the next probe is two seconds out
    // and the observation window must stay quiet.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let drained = count.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(count.load(Ordering::SeqCst), drained);
    assert!(monitor.is_active());

    monitor.deactivate().await;
}

#[tokio::test]
async fn test_check_now_returns_probe_outcome() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut server = EchoServer::tcp("check-now-target", 0);
    server.activate().await.expect("bind failed");

    let monitor = Monitor::tcp("127.0.0.1", Duration::from_secs(30), server.port());
    let outcome = monitor.check_now().await;
    assert_eq!(
        outcome,
        format!("Port {} on 127.0.0.1 is open.", server.port())
    );

    server.deactivate().await;
}
