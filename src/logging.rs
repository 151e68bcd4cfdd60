//! Diagnostic logging to stderr.
//!
//! Level resolution: `RWORKDAY_LOG` env var, then the config `log_level`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RWORKDAY_LOG";

pub fn init(config_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
