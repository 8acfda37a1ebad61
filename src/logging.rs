//! Logging setup for binaries that embed the reporting core.

use tracing_subscriber::{
    Layer,
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs a pretty-printed stdout subscriber.
///
/// The level defaults to `INFO` and can be overridden with the standard
/// `RUST_LOG` environment variable. Panics if a global subscriber is
/// already set, so call this once, at startup.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_filter(filter))
        .init();
}
