//! Error types for docmigrate
//!
//! This module defines the single error type used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::DocumentReference;
use std::io;
use thiserror::Error;

/// Result type alias for docmigrate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error key reported when an attachment's MIME type is not allowed.
pub const ATTACHMENT_INVALID_TYPE_ERROR_KEY: &str = "attachment.invalid.type";

/// Error key reported for generic input validation failures.
pub const INVALID_INPUT_ERROR_KEY: &str = "input.invalid";

/// Error types for docmigrate
#[derive(Debug, Error)]
pub enum Error {
    /// Document content is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// User-visible validation failure
    ///
    /// `key` is a stable identifier clients can map to a localized message.
    #[error("Invalid input ({key}): {message}")]
    InvalidInput {
        /// Stable error key
        key: &'static str,
        /// Human-readable detail
        message: String,
    },

    /// A JSON path string could not be parsed
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// No document is stored under the reference
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentReference),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error (snapshots, config output)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (snapshot and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a generic `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            key: INVALID_INPUT_ERROR_KEY,
            message: message.into(),
        }
    }

    /// Create an `InvalidInput` error carrying a specific error key
    pub fn invalid_input_with_key(key: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            key,
            message: message.into(),
        }
    }

    /// Create a `Storage` error
    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage(message.into())
    }

    /// Create a `Config` error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Whether this error is a user-visible input validation failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
