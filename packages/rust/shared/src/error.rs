//! Error types for cmdref.
//!
//! Library crates use [`CmdRefError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all cmdref operations.
#[derive(Debug, thiserror::Error)]
pub enum CmdRefError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Non-success HTTP response from the catalog or detail resource.
    #[error("request failed with HTTP status {status}")]
    Fetch { status: u16 },

    /// A detail resource answered 404 for this command name.
    #[error("command '{name}' not found")]
    NotFound { name: String },

    /// Transport-level network error (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Cache store write or removal error.
    #[error("store error: {0}")]
    Store(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CmdRefError>;

impl CmdRefError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a not-found error for a command name.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
