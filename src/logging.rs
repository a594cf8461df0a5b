//! Log subscriber setup.
//!
//! Logs go to stderr so stdout only carries the measurement report.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "REPLAY_DRIVER_LOG";

/// Build the filter: `REPLAY_DRIVER_LOG`, then `RUST_LOG`, then `default_level`
/// (or `debug` when verbose).
pub fn build_filter(verbose: bool, default_level: &str) -> EnvFilter {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("info"))
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        )
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbose: bool, default_level: &str) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(verbose, default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // Already installed (tests, repeated init) is fine.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
