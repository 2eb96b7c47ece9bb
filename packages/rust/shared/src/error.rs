//! Error types for terralabel.
//!
//! Library crates use [`LabelerError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Fatal variants (`Config`, `Path`, `Schema`, `Read`) abort the run
//! before any target file is mutated. `Io` is per-file: the walker
//! reports it and moves on to the next file.

use std::path::PathBuf;

/// Top-level error type for all terralabel operations.
#[derive(Debug, thiserror::Error)]
pub enum LabelerError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A required path is missing or of the wrong kind (lookup file
    /// absent, scan root not a directory).
    #[error("path error at {path:?}: {message}")]
    Path { path: PathBuf, message: String },

    /// Required columns absent from the lookup header.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Lookup file unreadable or malformed mid-parse.
    #[error("read error at {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    /// Filesystem I/O error on a single target file.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelerError>;

impl LabelerError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a path error for a missing or wrong-kind path.
    pub fn path(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a schema error from any displayable message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
        }
    }

    /// Create a read error tied to the lookup file.
    pub fn read(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error aborts the whole run (true for everything
    /// raised during the loading phase).
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
