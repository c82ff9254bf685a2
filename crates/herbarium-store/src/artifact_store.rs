//! Persisted build outputs
//!
//! Final artifacts, unlike memoized intermediates, live under the output
//! directory in a fixed layout:
//!
//! ```text
//! <output>/collections/<name>.json   flat collections
//! <output>/pages/<name>.json         paginated category views
//! <output>/indexes/<slug>/index         opaque search index blob
//! <output>/indexes/<slug>/raw_records   records the index was built from
//! ```
//!
//! The `index` blob is written byte-for-byte as the search builder
//! produced it; its format is owned by that collaborator.

use crate::cache_store::sanitize_key;
use crate::error::StoreError;
use herbarium_commons::{FlatCollection, Page};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of the two blobs written for one search index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexArtifact {
    pub index_path: PathBuf,
    pub raw_records_path: PathBuf,
}

/// Writes final build outputs under a root directory
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open an output directory, creating it if needed
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, StoreError> {
        let root = dir.into();
        fs::create_dir_all(&root)?;
        Ok(ArtifactStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one flat collection under `collections/<name>.json`
    pub fn write_collection(
        &self,
        name: &str,
        collection: &FlatCollection,
    ) -> Result<PathBuf, StoreError> {
        let path = self.write_json("collections", name, collection)?;
        log::debug!(
            "Wrote collection '{}' ({} entries) to {}",
            name,
            collection.len(),
            path.display()
        );
        Ok(path)
    }

    /// Write a paginated view under `pages/<name>.json`
    pub fn write_pages(&self, name: &str, pages: &[Page]) -> Result<PathBuf, StoreError> {
        let path = self.write_json("pages", name, &pages)?;
        log::debug!(
            "Wrote {} pages for '{}' to {}",
            pages.len(),
            name,
            path.display()
        );
        Ok(path)
    }

    /// Write a search index blob and its source records under
    /// `indexes/<slug>/`
    pub fn write_index(
        &self,
        slug: &str,
        index: &[u8],
        records: &[Value],
    ) -> Result<IndexArtifact, StoreError> {
        let dir = self.root.join("indexes").join(sanitize_key(slug)?);
        fs::create_dir_all(&dir)?;

        let index_path = dir.join("index");
        fs::write(&index_path, index)?;

        let raw_records_path = dir.join("raw_records");
        let content = serde_json::to_string(records)?;
        fs::write(&raw_records_path, content)?;

        log::debug!(
            "Wrote search index '{}' ({} records, {} index bytes)",
            slug,
            records.len(),
            index.len()
        );
        Ok(IndexArtifact {
            index_path,
            raw_records_path,
        })
    }

    fn write_json<T: Serialize>(
        &self,
        subdir: &str,
        name: &str,
        value: &T,
    ) -> Result<PathBuf, StoreError> {
        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.json", sanitize_key(name)?));
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)?;
        Ok(path)
    }
}
