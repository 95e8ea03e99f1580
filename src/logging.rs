use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_DIRECTIVE: &str = "info";

/// Installs a compact stdout subscriber filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let stdout = tracing_subscriber::fmt::layer().compact().with_filter(filter);

    tracing_subscriber::registry().with(stdout).init();

    info!(version = env!("CARGO_PKG_VERSION"), "logging started");
}
