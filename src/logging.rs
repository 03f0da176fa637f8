//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `drive_embed=debug`.
pub const LOG_ENV: &str = "DRIVE_EMBED_LOG";

/// Initialize structured logging to stderr; stdout carries converted output.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,drive_embed=debug"
    } else {
        "warn,drive_embed=info"
    };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
