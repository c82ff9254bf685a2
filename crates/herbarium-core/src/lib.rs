//! Core stages of the herbarium build pipeline
//!
//! The build turns two JSON source documents (the taxonomic classification
//! tree and the nursery directory) into flat collections, paginated
//! category views, and search indexes:
//!
//! - **flatten**: nested documents to flat, sorted collections
//! - **crossref**: join entries onto the categories they reference
//! - **paginate**: cut joined category lists into fixed-size pages
//! - **compose**: merge collections into one search-record list
//! - **pipeline**: orchestration with per-stage caching and persistence
//!
//! Collaborators the binary injects live behind traits: `SourceProvider`
//! (where documents come from), `PermalinkFormatter` (site URL scheme),
//! and `SearchIndexBuilder` (index file format).

pub mod compose;
pub mod crossref;
pub mod error;
pub mod flatten;
pub mod paginate;
pub mod permalink;
pub mod pipeline;
pub mod search;
pub mod sources;

pub use error::PipelineError;
pub use pipeline::{BuildSummary, PipelineSettings, PlantIndexPipeline};
