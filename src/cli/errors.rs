//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::index::DatasetError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file unreadable, malformed or invalid
    #[error("config error: {0}")]
    Config(String),

    /// Dataset failed to load in a one-shot command
    #[error("{0}")]
    Dataset(#[from] DatasetError),

    /// Runtime or listener failure
    #[error("server error: {0}")]
    Server(#[from] io::Error),

    /// Writing command output failed
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
