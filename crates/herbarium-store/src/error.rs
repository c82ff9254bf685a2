//! Error types for the herbarium stores

use thiserror::Error;

/// Errors raised by the cache and artifact stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),
}

impl StoreError {
    /// Create an InvalidKey error
    pub fn invalid_key<S: Into<String>>(msg: S) -> Self {
        StoreError::InvalidKey(msg.into())
    }

    /// Create an InvalidTtl error
    pub fn invalid_ttl<S: Into<String>>(msg: S) -> Self {
        StoreError::InvalidTtl(msg.into())
    }
}
