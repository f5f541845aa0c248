//! Logging setup
//!
//! The library only emits `tracing` events; the binary installs a subscriber
//! writing to stderr so report output on stdout stays pipeable.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter for a verbosity level, used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "mto=debug,info"
    } else {
        "warn"
    }
}

/// Initialize logging
///
/// # Environment
/// - `RUST_LOG`: overrides the level filter, e.g. `RUST_LOG=mto=trace`
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging for tests (captured by the test harness)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("mto=debug"))
        .with_test_writer()
        .try_init();
}
