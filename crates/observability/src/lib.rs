//! `oplps-observability` — process-wide tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process with the default filter.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with an explicit fallback filter, still overridable
/// via `RUST_LOG`.
pub fn init_with_filter(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}
