//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data in {path}: {source}")]
    Data {
        path: PathBuf,
        #[source]
        source: crate::domain::foundation::ValidationError,
    },
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Reply delay must be between 1 and 60000 ms")]
    InvalidReplyDelay,

    #[error("FAQ suggestion limit must be at least 1")]
    InvalidSuggestionLimit,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
