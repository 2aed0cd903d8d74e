//! The polling loop driving a monitor's probe.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::probe::Probe;
use crate::report;
use crate::service::ServiceKind;

/// Drive `probe` until `cancel` is observed.
///
/// The token is checked once per iteration; neither the sleep nor a check in
/// flight is interrupted, so shutdown can lag by one full interval plus one
/// probe duration.
pub(crate) async fn monitor_loop(
    name: String,
    service: ServiceKind,
    interval_ms: Arc<AtomicU64>,
    probe: Arc<dyn Probe>,
    cancel: CancellationToken,
) {
    while !cancel.is_cancelled() {
        let interval = Duration::from_millis(interval_ms.load(Ordering::Relaxed));
        let outcome = probe.check().await;
        info!("{}", report::monitor_report(&name, service, interval, &outcome));
        tokio::time::sleep(interval).await;
    }
}
