//! Logging set-up
//!
//! The terminal UI owns stdout, so debug output is sent to a log file.

use crate::utils::ConfigError;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default debug log location
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("ssl-checker.log")
}

/// Initialise the global tracing subscriber.
///
/// With `debug` set, everything down to `debug` is appended to `log_file`.
/// Otherwise `RUST_LOG` is honoured, falling back to `default_level`, and
/// output goes to stderr.
pub fn init(debug: bool, log_file: &Path, default_level: &str) -> Result<(), ConfigError> {
    if debug {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .map_err(|e| ConfigError::Logging {
                message: format!("{}: {}", log_file.display(), e),
            })?;

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| ConfigError::Logging {
                message: e.to_string(),
            })?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| ConfigError::Logging {
                message: e.to_string(),
            })?;
    }

    Ok(())
}
