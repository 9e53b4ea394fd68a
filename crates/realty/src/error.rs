//! Error types for the Realty library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Realty operations.
#[derive(Debug, Error)]
pub enum RealtyError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error (missing reserved column, bad setting).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// The request itself is unusable (empty query, no location named).
    #[error("{0}")]
    InvalidInput(String),

    /// The resolved intent matched no rows.
    #[error("{0}")]
    NotFound(String),

    /// The resolved value column does not exist in the dataset.
    #[error("Column '{column}' is missing in the data.")]
    SchemaMismatch { column: String },
}

impl RealtyError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        RealtyError::InvalidInput(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        RealtyError::NotFound(message.into())
    }

    pub(crate) fn missing_column(column: impl Into<String>) -> Self {
        RealtyError::SchemaMismatch {
            column: column.into(),
        }
    }

    /// Whether the error was caused by the request rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RealtyError::InvalidInput(_)
                | RealtyError::NotFound(_)
                | RealtyError::SchemaMismatch { .. }
        )
    }
}

/// Result type alias for Realty operations.
pub type Result<T> = std::result::Result<T, RealtyError>;
