//! Core error types for holyshield-core.
//!
//! Normalization and grid building never fail; the errors here cover
//! loading the site configuration and looking sessions up by slug.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for holyshield-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Slug lookup errors
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// File extension is neither `.toml` nor `.json`
    #[error("Unsupported configuration format for {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Lookup errors raised when a slug addresses nothing.
///
/// Presentation code is expected to turn these into a redirect or an
/// empty state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No session with slug '{slug}'")]
    SessionNotFound { slug: String },

    #[error("No speaker with slug '{slug}'")]
    SpeakerNotFound { slug: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
