//! Permalink formatting seam
//!
//! Display paths on composite records come from a formatter the binary
//! injects. The default implementation mirrors the site's URL scheme;
//! tests can substitute their own to keep assertions independent of it.

use herbarium_commons::Record;

/// Formats the site path of one node
pub trait PermalinkFormatter: Send + Sync {
    /// Site path for a node; stored verbatim on the composite record
    fn format(&self, node: &Record) -> String;
}

/// Site URL scheme: `/<type>/<identifier>/`
#[derive(Debug, Default, Clone, Copy)]
pub struct SitePermalinkFormatter;

impl PermalinkFormatter for SitePermalinkFormatter {
    fn format(&self, node: &Record) -> String {
        match node.identity() {
            Some(identity) => format!("/{}/{}/", identity.node_type, identity.identifier),
            None => "/".to_string(),
        }
    }
}
