//! Error types for filedesk.

use thiserror::Error;

/// Common error type for filedesk.
#[derive(Error, Debug)]
pub enum FiledeskError {
    /// Database error.
    ///
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    ///
    /// Raised at startup when a required setting (such as the database URL) is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<sqlx::Error> for FiledeskError {
    fn from(e: sqlx::Error) -> Self {
        FiledeskError::Database(e.to_string())
    }
}

/// Result type alias for filedesk operations.
pub type Result<T> = std::result::Result<T, FiledeskError>;
