//! Tracing initialization shared by the vigil demos and binaries.

use std::env::var;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Initialize the global tracing subscriber at INFO by default.
pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Initialize the global tracing subscriber with an explicit default level.
///
/// `RUST_LOG` narrows the filter further; `RUST_LOG_FORMAT=json` switches
/// the output layer to JSON.
pub fn init_with_level(level: LevelFilter) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let layer = match var("RUST_LOG_FORMAT").unwrap_or_default().as_str() {
        "json" => tracing_subscriber::fmt::layer().json().with_filter(env_filter).boxed(),
        _ => tracing_subscriber::fmt::layer().compact().with_filter(env_filter).boxed(),
    };

    tracing_subscriber::registry().with(layer).init();
}
