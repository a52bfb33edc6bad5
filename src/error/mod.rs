//! Error handling module for audiotrim

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for audiotrim operations
#[derive(Error, Debug)]
pub enum TrimError {
    /// Error raised by the domain layer or a port
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid time format
    #[error("Invalid {field} time '{value}': {message}")]
    InvalidTime {
        field: &'static str,
        value: String,
        message: String,
    },

    /// Logging could not be initialised
    #[error("Failed to initialize logging: {message}")]
    LoggingInit { message: String },

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for audiotrim operations
pub type TrimResult<T> = std::result::Result<T, TrimError>;
