//! Error types for SQLens

use thiserror::Error;

/// Core error type for SQLens operations
#[derive(Error, Debug)]
pub enum SqlensError {
    #[error("Query error: {0}")]
    Query(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Comparison error: {0}")]
    Comparison(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for SQLens operations
pub type Result<T> = std::result::Result<T, SqlensError>;
