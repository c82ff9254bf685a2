//! Search index building seam
//!
//! The index file format is owned by whatever search library the site
//! embeds. The pipeline hands the builder the record values plus the field
//! projection and persists the returned bytes untouched.

use crate::error::PipelineError;
use serde_json::{json, Value};

/// Builds an opaque search index blob from record values
pub trait SearchIndexBuilder: Send + Sync {
    /// Serialize a search index over `records`
    ///
    /// # Arguments
    /// * `records` - Record objects to index
    /// * `identifier_field` - Field holding each record's unique key
    /// * `indexed_fields` - Fields the index makes searchable
    ///
    /// # Returns
    /// The index bytes; callers treat them as opaque.
    fn build(
        &self,
        records: &[Value],
        identifier_field: &str,
        indexed_fields: &[&str],
    ) -> Result<Vec<u8>, PipelineError>;
}

/// Plain JSON index: every record projected down to the indexed fields
///
/// The emitted shape is stable and deterministic so downstream tooling can
/// diff and consume it.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSearchIndexBuilder;

impl SearchIndexBuilder for JsonSearchIndexBuilder {
    fn build(
        &self,
        records: &[Value],
        identifier_field: &str,
        indexed_fields: &[&str],
    ) -> Result<Vec<u8>, PipelineError> {
        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            let map = match record.as_object() {
                Some(map) => map,
                None => continue,
            };
            let identifier = match map.get(identifier_field) {
                Some(identifier) => identifier.clone(),
                None => {
                    return Err(PipelineError::search(format!(
                        "record without '{}' field cannot be indexed",
                        identifier_field
                    )));
                }
            };

            let mut document = serde_json::Map::new();
            document.insert(identifier_field.to_string(), identifier);
            for field in indexed_fields {
                if let Some(value) = map.get(*field) {
                    document.insert((*field).to_string(), value.clone());
                }
            }
            documents.push(Value::Object(document));
        }

        let index = json!({
            "identifier_field": identifier_field,
            "indexed_fields": indexed_fields,
            "documents": documents,
        });
        serde_json::to_vec(&index).map_err(PipelineError::from)
    }
}
