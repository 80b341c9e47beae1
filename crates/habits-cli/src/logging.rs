//! Logging setup
//!
//! Logs go to the configured `log_file` when set, otherwise to stderr.
//! The filter comes from `HABITS_LOG` (e.g. `HABITS_LOG=debug`) and
//! defaults to warnings only.

use std::fs::OpenOptions;
use std::sync::Mutex;

use habits_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "HABITS_LOG";

/// Initialize the global tracing subscriber
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("habits_core=warn,habits_cli=warn"));

    if let Some(log_path) = &config.log_file {
        let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                return;
            }
        };

        // Ignore error if already initialized
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(log_file))
            .try_init();

        info!("logging initialized to {:?}", log_path);
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
