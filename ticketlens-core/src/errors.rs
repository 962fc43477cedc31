use std::io;

use thiserror::Error;

/// Result type used across the TicketLens core crate.
pub type Result<T> = std::result::Result<T, TicketLensError>;

/// Canonical error representation shared by all crates.
#[derive(Debug, Error)]
pub enum TicketLensError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("deserialization error: {0}")]
    DeserializationError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("general error: {0}")]
    GeneralError(String),
}

impl From<serde_json::Error> for TicketLensError {
    fn from(err: serde_json::Error) -> Self {
        TicketLensError::DeserializationError(err.to_string())
    }
}

impl From<anyhow::Error> for TicketLensError {
    fn from(err: anyhow::Error) -> Self {
        TicketLensError::GeneralError(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable is not set: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {key}: {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("invalid URL in {key}: {source}")]
    InvalidUrl {
        key: String,
        #[source]
        source: url::ParseError,
    },
}

impl From<ConfigError> for TicketLensError {
    fn from(value: ConfigError) -> Self {
        TicketLensError::ConfigError(value.to_string())
    }
}
