//! Slug identifiers for taxonomy and directory nodes
//!
//! Slugs are the machine-readable identifiers naming every node in the
//! source documents. They are case-sensitive and compared byte-wise, so
//! collection ordering is stable across runs and independent of locale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable node identifier (e.g. "quercus-alba")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a new slug, preserving the identifier exactly as stored
    pub fn new<S: Into<String>>(slug: S) -> Self {
        Slug(slug.into())
    }

    /// Get the slug as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Slug {
    fn from(s: &str) -> Self {
        Slug::new(s)
    }
}

impl From<String> for Slug {
    fn from(s: String) -> Self {
        Slug::new(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
