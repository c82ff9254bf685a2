//! Composite search records
//!
//! One `CompositeRecord` per indexed entity, merged from the taxonomy
//! collections, the common-name labels, and the nursery presence lists.
//! Identifiers are unique across the composed list; passes that revisit an
//! identifier merge into the existing record instead of appending.

use crate::models::slug::Slug;
use serde::{Deserialize, Serialize};

/// One entry in the merged search index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRecord {
    pub identifier: Slug,
    pub name: String,
    /// Site path produced by the permalink formatter, treated opaquely
    pub display_path: String,
    #[serde(default)]
    pub has_plant: bool,
    #[serde(default)]
    pub has_common_name: bool,
    #[serde(default)]
    pub available_in_nursery: bool,
    #[serde(default)]
    pub has_citations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_level_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_level_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
}

impl CompositeRecord {
    /// New record with all flags cleared and no level metadata
    pub fn new(identifier: Slug, name: impl Into<String>, display_path: impl Into<String>) -> Self {
        CompositeRecord {
            identifier,
            name: name.into(),
            display_path: display_path.into(),
            has_plant: false,
            has_common_name: false,
            available_in_nursery: false,
            has_citations: false,
            taxonomy_level_key: None,
            taxonomy_level_name: None,
            common_name: None,
        }
    }
}

/// Marker applied by the presence passes of the composer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceFlag {
    AvailableInNursery,
    HasCitations,
}

impl PresenceFlag {
    /// Name of the field the flag raises
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceFlag::AvailableInNursery => "available_in_nursery",
            PresenceFlag::HasCitations => "has_citations",
        }
    }

    /// Raise the corresponding flag on a record
    pub fn apply(&self, record: &mut CompositeRecord) {
        match self {
            PresenceFlag::AvailableInNursery => record.available_in_nursery = true,
            PresenceFlag::HasCitations => record.has_citations = true,
        }
    }
}
