//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::tutoring::TutorError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Could not read tutoring script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse tutoring script: {0}")]
    ScriptParse(#[from] serde_yaml::Error),

    #[error(transparent)]
    InvalidScript(#[from] TutorError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid AI request timeout")]
    InvalidTimeout,

    #[error("AI retry attempts must be at least 1")]
    InvalidRetryAttempts,

    #[error("Invalid AI base URL format")]
    InvalidBaseUrl,

    #[error("Tutoring script not found: {0}")]
    ScriptNotFound(String),
}
