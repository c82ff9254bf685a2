//! Durable stores for the herbarium build pipeline
//!
//! Two stores back the build:
//! - **CacheStore**: memoizes expensive stage outputs on disk with a TTL,
//!   one JSON entry per asset key
//! - **ArtifactStore**: persists final build outputs (flat collections,
//!   paginated views, search indexes) under the output directory

pub mod artifact_store;
pub mod cache_store;
pub mod error;

pub use artifact_store::{ArtifactStore, IndexArtifact};
pub use cache_store::{CacheEntry, CacheStats, CacheStore, CacheTtl};
pub use error::StoreError;
