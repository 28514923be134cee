use thiserror::Error;

/// Errors raised while bootstrapping or running a service.
///
/// Request-level failures are mapped to HTTP responses by each service's own
/// error type; this one only covers what happens around the server.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}
