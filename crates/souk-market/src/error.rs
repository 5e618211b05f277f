//! Error types for the search core.

use thiserror::Error;

/// Errors raised by domain operations.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Category not found in the loaded tree.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Filter key unknown to every facet schema.
    #[error("Unknown filter key: {0}")]
    UnknownFilterKey(String),

    /// Facet value that cannot be interpreted for its facet kind.
    #[error("Invalid value for facet {key}: {value}")]
    InvalidFacetValue { key: String, value: String },

    /// Unsupported language code.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Errors reported by a listing store backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the query.
    #[error("Query execution failed: {0}")]
    QueryError(String),

    /// Failed to decode a record.
    #[error("Deserialization error: {0}")]
    DeserializeError(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::DeserializeError(e.to_string())
    }
}
