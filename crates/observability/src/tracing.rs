//! Tracing/logging initialization.
//!
//! The permission core logs lifecycle transitions (snapshot loads, logouts,
//! stale-response drops); this wires those events to stdout for binaries and
//! integration tests.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
///
/// Stale-load drops are logged at debug in the session crate; surface them
/// by default while keeping dependencies at info.
const DEFAULT_FILTER: &str = "info,stagedesk_session=debug";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .try_init();
}
