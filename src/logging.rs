//! `tracing` subscriber setup for embedders and tests.

use tracing_subscriber::EnvFilter;

/// Installs a formatted subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"` or
/// `"bukubridge=debug"`) is used. Returns `false` if a global subscriber was
/// already installed, in which case nothing changes.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
