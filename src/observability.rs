//! Structured logging setup.
//!
//! Controlled by the `RUST_LOG` environment variable; the default level is
//! `warn` so normal runs only surface recoverable issues (skipped
//! statements, failed renderings). `RUST_LOG=debug` shows per-method
//! progress.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber. Call once, early in `main`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
