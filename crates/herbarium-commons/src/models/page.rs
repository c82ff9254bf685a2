//! Paginated category views
//!
//! A category's joined item list is cut into fixed-size pages. The first
//! page lives at the category's bare slug; later pages append `/2`, `/3`,
//! and so on. Every page carries the full slug chain so templates can
//! render pagination controls without recomputing it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Slug chain linking the pages of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSlugs {
    /// Every page slug of the category, in page order
    pub all: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub first: String,
    pub last: String,
}

/// One rendered page of a category's item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Display name of the category
    pub title: String,
    /// Slug of this page (bare category slug for page zero)
    pub slug: String,
    /// Zero-based position within the category's page run
    pub page_number: usize,
    pub total_pages: usize,
    /// Legacy archive key of the category
    pub archival_id: i64,
    pub items: Vec<Value>,
    pub page_slugs: PageSlugs,
}
