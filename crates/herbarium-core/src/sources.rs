//! Source document loading
//!
//! The pipeline consumes two JSON documents: the taxonomic classification
//! tree and the nursery directory. `SourceProvider` abstracts where they
//! come from so tests can swap in fixtures without touching the disk
//! layout.

use crate::error::PipelineError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the two source documents the pipeline reads
pub trait SourceProvider: Send + Sync {
    /// The taxonomic classification tree
    fn taxonomy(&self) -> Result<Value, PipelineError>;

    /// The nursery directory listing
    fn directory(&self) -> Result<Value, PipelineError>;
}

/// Reads the source documents from JSON files on disk
pub struct FileSourceProvider {
    taxonomy_path: PathBuf,
    directory_path: PathBuf,
}

impl FileSourceProvider {
    pub fn new<P: Into<PathBuf>>(taxonomy_path: P, directory_path: P) -> Self {
        FileSourceProvider {
            taxonomy_path: taxonomy_path.into(),
            directory_path: directory_path.into(),
        }
    }
}

impl SourceProvider for FileSourceProvider {
    fn taxonomy(&self) -> Result<Value, PipelineError> {
        read_json_document(&self.taxonomy_path)
    }

    fn directory(&self) -> Result<Value, PipelineError> {
        read_json_document(&self.directory_path)
    }
}

fn read_json_document(path: &Path) -> Result<Value, PipelineError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| PipelineError::source(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| PipelineError::source(format!("failed to parse {}: {}", path.display(), e)))
}
