//! Logging bootstrap for embedding hosts and integration tests

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// Filter comes from `ALLY_LOG` (falling back to `info`). Calling this
/// more than once is harmless; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("ALLY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
