//! Error types for the launcher core

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the core's boundaries.
///
/// Nothing here is fatal: the dispatcher turns every variant into a no-op plus
/// a log line, and config failures degrade to an empty service set.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse {format} config: {message}")]
    ConfigParse {
        format: &'static str,
        message: String,
    },

    #[error("unsupported config format: {0}")]
    UnsupportedConfigFormat(String),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("unknown view handle: {0}")]
    UnknownViewHandle(u64),

    #[error("shell has been torn down")]
    ShellTornDown,
}

/// Result type for core operations
pub type ShellResult<T> = Result<T, ShellError>;
