use crate::config::ConfigError;

/// Errors that stop the viewer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("unknown planet {0:?}, expected a name or an index below 8")]
    UnknownPlanet(String),
}
