//! Errors for parking time generator
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    ConfigurationError { message: String },

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Local time {0} cannot be resolved")]
    UnresolvableTime(String),
}
