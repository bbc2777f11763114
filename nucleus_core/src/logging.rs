//! Tracing setup for the `nucleus` binary.
//!
//! Log lines go to stderr; stdout carries only plan tables and JSON.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Quiet by default: only warnings (e.g. a lock that could not be released)
pub fn init() {
    init_with_level("warn")
}

/// Install the global subscriber; `RUST_LOG` overrides `default_level`
///
/// `RUST_LOG=nucleus_core=debug` shows every adjusted day and each schedule
/// load and save.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Debug-level subscriber routed through the test harness; safe to call from
/// several tests
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("nucleus_core=debug"))
        .try_init();
}
