//! # Telemetry
//!
//! Log subscriber setup for the host binary. Filter from `RUST_LOG`, `info`
//! by default.

use tracing_subscriber::EnvFilter;

/// Initialize the global log subscriber. Call once, before the container is
/// built.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
