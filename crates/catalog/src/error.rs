//! Error types for the catalog crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading the inventory.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The data file could not be read
    #[error("Failed to read inventory file {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a JSON array of records
    #[error("Invalid inventory data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error code for integration with autoparts-core error handling.
/// Range: 92xx for catalog errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    /// Data file unreadable
    Io = 9201,
    /// Data file malformed
    JsonParsing = 9202,
}

impl CatalogError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CatalogErrorCode {
        match self {
            CatalogError::Io { .. } => CatalogErrorCode::Io,
            CatalogError::Json(_) => CatalogErrorCode::JsonParsing,
        }
    }
}
