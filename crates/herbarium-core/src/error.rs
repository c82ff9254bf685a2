//! Error types for the build pipeline

use herbarium_store::StoreError;
use thiserror::Error;

/// Errors raised while running the build pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Missing document node: {0}")]
    MissingDocument(String),

    #[error("Search index error: {0}")]
    Search(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create a Source error
    pub fn source<S: Into<String>>(msg: S) -> Self {
        PipelineError::Source(msg.into())
    }

    /// Create a MissingDocument error
    pub fn missing_document<S: Into<String>>(msg: S) -> Self {
        PipelineError::MissingDocument(msg.into())
    }

    /// Create a Search error
    pub fn search<S: Into<String>>(msg: S) -> Self {
        PipelineError::Search(msg.into())
    }

    /// Create an Other error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PipelineError::Other(msg.into())
    }
}

impl From<String> for PipelineError {
    fn from(msg: String) -> Self {
        PipelineError::Other(msg)
    }
}
