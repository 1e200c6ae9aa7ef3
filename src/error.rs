//! Error types for datefixer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while inspecting or shifting a message store.
#[derive(Error, Debug)]
pub enum DateFixerError {
    /// The file could not be opened as a message store.
    ///
    /// Covers files that are not databases, files locked by a running chat
    /// client, and databases without the expected table or column.
    #[error("cannot open '{}': {cause}", path.display())]
    Open {
        /// The file that was being opened.
        path: PathBuf,
        /// The raw cause reported by the database driver.
        cause: String,
    },

    /// A query or update failed on an already open store.
    #[error("database error: {0}")]
    Database(String),

    /// An operation was attempted in a session state that does not allow it.
    #[error("{0}")]
    InvalidState(String),

    /// The requested number of days to shift is not a positive integer.
    #[error("invalid shift of {0} days: the number of days must be positive")]
    InvalidShift(i64),

    /// A table or column name is not a plain SQL identifier.
    #[error("invalid schema: {0}")]
    Schema(String),

    /// Configuration could not be read, parsed, or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization of output failed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The terminal could not be set up or driven.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// An I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DateFixerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl DateFixerError {
    /// Build an open failure from any displayable cause.
    pub fn open(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::Open {
            path: path.into(),
            cause: cause.to_string(),
        }
    }
}
