//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for applications embedding the limiter.
///
/// Users can install their own subscriber; this helper installs an
/// env-filtered fmt subscriber only if none is set, defaulting to
/// `taskgate=info` when `RUST_LOG` is absent.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskgate=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
