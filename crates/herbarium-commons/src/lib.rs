//! Shared data model for the herbarium build pipeline
//!
//! This crate holds the types passed between pipeline stages:
//! - **Record / NodeIdentity**: loosely-typed source nodes with typed accessors
//! - **Envelope / FlatCollection**: sorted flat collections of nodes
//! - **CompositeRecord / PresenceFlag**: merged search-index entries
//! - **Page / PageSlugs**: paginated category views
//! - **Slug**: case-sensitive node identifiers
//!
//! It also defines the field names, node types, and cache asset keys used
//! across the workspace so that stages agree on the wire vocabulary.

pub mod constants;
pub mod models;

// Re-export commonly used types at the crate root
pub use models::composite::{CompositeRecord, PresenceFlag};
pub use models::flat::{Envelope, FlatCollection};
pub use models::page::{Page, PageSlugs};
pub use models::record::{NodeIdentity, Record};
pub use models::slug::Slug;
