//! File-backed structured logging.
//!
//! The terminal belongs to the canvas while the viewer runs, so events are only
//! recorded when a log file is configured.

use std::fs::{self, File};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;
use crate::error::AppError;

/// Builds the filter, preferring `RUST_LOG` over the configured directives.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global subscriber. Returns `false` when logging stays disabled.
pub fn init_logging(config: &LogConfig) -> Result<bool, AppError> {
    let Some(path) = config.file.as_deref() else {
        return Ok(false);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(&config.level))
        .with(file_layer)
        .try_init()?;
    Ok(true)
}
