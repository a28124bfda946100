use thiserror::Error;

use crate::search::SearchError;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Category value outside the fixed enumeration
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Search index errors
    #[error("Search index error: {0}")]
    Index(#[from] SearchError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for CatalogError {
    fn from(err: validator::ValidationErrors) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
