//! Error types for the CLI

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// The row file is not a JSON array of flat objects
    #[error("Invalid rows in {source_name}: {message}")]
    Rows {
        source_name: String,
        message: String,
    },

    /// Mapping failed
    #[error(transparent)]
    Mapping(#[from] unjoin_core::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
