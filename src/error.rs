//! Error types for QuoteSync.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for QuoteSync operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Main error type for QuoteSync operations
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Import format error: {0}")]
    ImportFormat(String),

    #[error("Sync unavailable: {0}")]
    SyncUnavailable(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuoteError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QuoteError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new sync-unavailable error
    pub fn sync_unavailable(message: impl Into<String>) -> Self {
        QuoteError::SyncUnavailable(message.into())
    }

    /// Create a new persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        QuoteError::Persistence(message.into())
    }

    /// Create a new import format error
    pub fn import_format(message: impl Into<String>) -> Self {
        QuoteError::ImportFormat(message.into())
    }
}
