//! Logging setup

use crate::config::DebugConfig;
use crate::error::{CoreError, Result};
use tracing_subscriber::EnvFilter;

/// Build the log filter. `RUST_LOG` wins over the configured level.
pub fn env_filter(debug: &DebugConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(debug.log_level.as_filter()))
}

/// Initialize the global tracing subscriber
pub fn init(debug: &DebugConfig) -> Result<()> {
    let filter = env_filter(debug);

    if debug.log_to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&debug.log_path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .try_init()
            .map_err(|e| CoreError::Config(format!("Failed to initialize logging: {}", e)))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| CoreError::Config(format!("Failed to initialize logging: {}", e)))
    }
}
