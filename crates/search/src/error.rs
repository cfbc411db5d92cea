//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    /// Search configuration rejected at construction time
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}
