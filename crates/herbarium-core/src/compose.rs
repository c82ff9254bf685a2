//! Composite record composition
//!
//! Builds the flat search-record list in four passes:
//!
//! 1. the taxonomy level collections seed one record per node
//! 2. common-name labels merge onto their plant, or stand alone
//! 3. nursery presence raises `available_in_nursery`
//! 4. citation presence raises `has_citations`
//!
//! No two records ever share an identifier. When a later pass revisits
//! one, the full merge wins: every field the pass carries overwrites the
//! stored value, and the identifier itself never changes.

use crate::permalink::PermalinkFormatter;
use herbarium_commons::constants::{FIELD_IDENTIFIER, FIELD_LOWER_LEVEL, FIELD_PLANT};
use herbarium_commons::{CompositeRecord, FlatCollection, PresenceFlag, Record, Slug};
use serde_json::Value;
use std::sync::Arc;

/// Builds composite search records from the flattened collections
pub struct IndexComposer {
    permalink: Arc<dyn PermalinkFormatter>,
}

impl IndexComposer {
    pub fn new(permalink: Arc<dyn PermalinkFormatter>) -> Self {
        IndexComposer { permalink }
    }

    /// Compose the search-record list
    ///
    /// # Arguments
    /// * `level_collections` - Taxonomy collections; every named node
    ///   seeds a record
    /// * `labels` - Common-name labels referencing zero or one plant
    /// * `presence` - Per-flag collections of plant references
    ///
    /// # Returns
    /// Records in first-seen order, deterministic for identical inputs.
    pub fn compose(
        &self,
        level_collections: &[&FlatCollection],
        labels: &FlatCollection,
        presence: &[(PresenceFlag, &FlatCollection)],
    ) -> Vec<CompositeRecord> {
        let mut records: Vec<CompositeRecord> = Vec::new();

        // Pass 1: seed from the taxonomy collections
        for collection in level_collections {
            for node in collection.records() {
                let (identity, name) = match (node.identity(), node.name()) {
                    (Some(identity), Some(name)) => (identity, name),
                    _ => continue,
                };

                let mut record = CompositeRecord::new(
                    Slug::new(identity.identifier),
                    name,
                    self.permalink.format(node),
                );
                record.has_plant = true;
                let (level_key, level_name) = taxonomy_level(node, identity.node_type);
                record.taxonomy_level_key = Some(level_key);
                record.taxonomy_level_name = Some(level_name);
                upsert(&mut records, record);
            }
        }

        // Pass 2: merge common-name labels, either onto the referenced
        // plant or under the label's own identifier
        for label in labels.records() {
            let label_name = match label.name() {
                Some(label_name) => label_name,
                None => continue,
            };
            let target = match plant_reference(label) {
                Some(plant_id) => Some(plant_id),
                None => label.identifier().map(String::from),
            };
            if let Some(identifier) = target {
                merge_label(
                    &mut records,
                    &identifier,
                    label_name,
                    self.permalink.format(label),
                );
            }
        }

        // Passes 3 and 4: raise presence flags; references matching no
        // composed record are ignored
        for (flag, listing) in presence {
            for entry in listing.records() {
                let identifier = match entry.identifier() {
                    Some(identifier) => identifier,
                    None => continue,
                };
                match find_mut(&mut records, identifier) {
                    Some(record) => flag.apply(record),
                    None => log::debug!(
                        "Presence reference '{}' matches no composed record, ignored",
                        identifier
                    ),
                }
            }
        }

        records
    }
}

/// Insert or fully overwrite by identifier, keeping first-seen position
fn upsert(records: &mut Vec<CompositeRecord>, record: CompositeRecord) {
    match find_index(records, record.identifier.as_str()) {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
}

/// Merge a common-name label onto the record for `identifier`
///
/// The label's field set overwrites whatever an earlier pass stored; when
/// no record exists yet, one is appended from defaults plus these fields.
fn merge_label(
    records: &mut Vec<CompositeRecord>,
    identifier: &str,
    label_name: &str,
    display_path: String,
) {
    match find_index(records, identifier) {
        Some(index) => {
            let record = &mut records[index];
            record.name = label_name.to_string();
            record.display_path = display_path;
            record.has_common_name = true;
            record.common_name = Some(label_name.to_string());
        }
        None => {
            let mut record =
                CompositeRecord::new(Slug::new(identifier), label_name, display_path);
            record.has_common_name = true;
            record.common_name = Some(label_name.to_string());
            records.push(record);
        }
    }
}

fn find_index(records: &[CompositeRecord], identifier: &str) -> Option<usize> {
    records
        .iter()
        .position(|record| record.identifier.as_str() == identifier)
}

fn find_mut<'a>(
    records: &'a mut [CompositeRecord],
    identifier: &str,
) -> Option<&'a mut CompositeRecord> {
    find_index(records, identifier).map(move |index| &mut records[index])
}

/// Plant identifier referenced by a label, if any
fn plant_reference(label: &Record) -> Option<String> {
    label
        .get(FIELD_PLANT)
        .and_then(Value::as_object)
        .and_then(|map| map.get(FIELD_IDENTIFIER))
        .and_then(Value::as_str)
        .map(String::from)
}

/// Descriptive level of a node: the `lower_level` object copied verbatim
/// when well-formed, otherwise the node type with its first letter
/// capitalized
fn taxonomy_level(node: &Record, node_type: &str) -> (String, String) {
    if let Some(level) = node.get(FIELD_LOWER_LEVEL).and_then(Value::as_object) {
        let key = level.get("key").and_then(Value::as_str);
        let name = level.get("name").and_then(Value::as_str);
        if let (Some(key), Some(name)) = (key, name) {
            return (key.to_string(), name.to_string());
        }
    }
    (node_type.to_string(), capitalize(node_type))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permalink::SitePermalinkFormatter;
    use serde_json::json;

    fn composer() -> IndexComposer {
        IndexComposer::new(Arc::new(SitePermalinkFormatter))
    }

    fn collection(values: Vec<Value>) -> FlatCollection {
        FlatCollection::from_records(
            values
                .iter()
                .map(|value| Record::from_value(value).unwrap())
                .collect(),
        )
    }

    fn find<'a>(records: &'a [CompositeRecord], identifier: &str) -> &'a CompositeRecord {
        records
            .iter()
            .find(|record| record.identifier.as_str() == identifier)
            .expect("record should be composed")
    }

    #[test]
    fn test_taxonomy_nodes_seed_records_with_levels() {
        let families = collection(vec![
            json!({
                "type": "family",
                "identifier": "pinaceae",
                "name": "Pine family",
                "lower_level": {"key": "genus", "name": "Genera"}
            }),
            json!({"type": "family", "identifier": "rosaceae", "name": "Rose family"}),
        ]);

        let records = composer().compose(&[&families], &FlatCollection::default(), &[]);
        assert_eq!(records.len(), 2);

        let pinaceae = find(&records, "pinaceae");
        assert!(pinaceae.has_plant);
        assert_eq!(pinaceae.display_path, "/family/pinaceae/");
        // Well-formed lower_level labels are copied verbatim
        assert_eq!(pinaceae.taxonomy_level_key.as_deref(), Some("genus"));
        assert_eq!(pinaceae.taxonomy_level_name.as_deref(), Some("Genera"));

        let rosaceae = find(&records, "rosaceae");
        // Fallback: the node type, capitalized for display
        assert_eq!(rosaceae.taxonomy_level_key.as_deref(), Some("family"));
        assert_eq!(rosaceae.taxonomy_level_name.as_deref(), Some("Family"));
    }

    #[test]
    fn test_nodes_missing_name_or_identity_are_skipped() {
        let families = collection(vec![
            json!({"type": "family", "identifier": "unnamed"}),
            json!({"type": "family", "name": "No identifier"}),
            json!({"type": "family", "identifier": "kept", "name": "Kept"}),
        ]);

        let records = composer().compose(&[&families], &FlatCollection::default(), &[]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier.as_str(), "kept");
    }

    #[test]
    fn test_label_merges_onto_referenced_plant() {
        let genera = collection(vec![json!({
            "type": "genus", "identifier": "acer", "name": "Maples"
        })]);
        let labels = collection(vec![json!({
            "type": "common_name",
            "identifier": "maple",
            "name": "Maple",
            "plant": {"type": "genus", "identifier": "acer"}
        })]);

        let records = composer().compose(&[&genera], &labels, &[]);
        assert_eq!(records.len(), 1);

        let acer = find(&records, "acer");
        // The label's full field set wins over the seeded values,
        // the identifier never changes
        assert!(acer.has_plant);
        assert!(acer.has_common_name);
        assert_eq!(acer.name, "Maple");
        assert_eq!(acer.common_name.as_deref(), Some("Maple"));
        assert_eq!(acer.display_path, "/common_name/maple/");
        // Level metadata from pass 1 is not part of the label merge
        assert_eq!(acer.taxonomy_level_key.as_deref(), Some("genus"));
    }

    #[test]
    fn test_label_without_reference_stands_alone() {
        let labels = collection(vec![json!({
            "type": "common_name", "identifier": "hedgewort", "name": "Hedgewort"
        })]);

        let records = composer().compose(&[], &labels, &[]);
        assert_eq!(records.len(), 1);

        let hedgewort = &records[0];
        assert_eq!(hedgewort.identifier.as_str(), "hedgewort");
        assert!(!hedgewort.has_plant);
        assert!(hedgewort.has_common_name);
        assert_eq!(hedgewort.common_name.as_deref(), Some("Hedgewort"));
    }

    #[test]
    fn test_label_referencing_unindexed_plant_appends_default_record() {
        let labels = collection(vec![json!({
            "type": "common_name",
            "identifier": "ghost-orchid",
            "name": "Ghost orchid",
            "plant": {"type": "genus", "identifier": "dendrophylax"}
        })]);

        let records = composer().compose(&[], &labels, &[]);
        assert_eq!(records.len(), 1);

        let ghost = find(&records, "dendrophylax");
        assert!(!ghost.has_plant);
        assert!(ghost.has_common_name);
        assert_eq!(ghost.name, "Ghost orchid");
    }

    #[test]
    fn test_presence_passes_raise_flags_and_ignore_unmatched() {
        let genera = collection(vec![
            json!({"type": "genus", "identifier": "acer", "name": "Maples"}),
            json!({"type": "genus", "identifier": "pinus", "name": "Pines"}),
        ]);
        let in_nurseries = collection(vec![
            json!({"type": "plant", "identifier": "acer"}),
            json!({"type": "plant", "identifier": "unknown-plant"}),
        ]);
        let cited = collection(vec![json!({"type": "plant", "identifier": "pinus"})]);

        let records = composer().compose(
            &[&genera],
            &FlatCollection::default(),
            &[
                (PresenceFlag::AvailableInNursery, &in_nurseries),
                (PresenceFlag::HasCitations, &cited),
            ],
        );

        assert_eq!(records.len(), 2);
        let acer = find(&records, "acer");
        assert!(acer.available_in_nursery);
        assert!(!acer.has_citations);

        let pinus = find(&records, "pinus");
        assert!(!pinus.available_in_nursery);
        assert!(pinus.has_citations);
    }

    #[test]
    fn test_identifiers_stay_unique_across_passes() {
        let families = collection(vec![json!({
            "type": "family", "identifier": "erica", "name": "Heath family"
        })]);
        let genera = collection(vec![json!({
            "type": "genus", "identifier": "erica", "name": "Heaths"
        })]);
        let labels = collection(vec![json!({
            "type": "common_name", "identifier": "erica", "name": "Heather"
        })]);

        let records = composer().compose(&[&families, &genera], &labels, &[]);
        assert_eq!(records.len(), 1);

        let erica = &records[0];
        // Later passes merged over the same record: the genus seed
        // replaced the family seed, then the label merged on top
        assert_eq!(erica.name, "Heather");
        assert!(erica.has_plant);
        assert!(erica.has_common_name);
        assert_eq!(erica.taxonomy_level_key.as_deref(), Some("genus"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let genera = collection(vec![
            json!({"type": "genus", "identifier": "acer", "name": "Maples"}),
            json!({"type": "genus", "identifier": "pinus", "name": "Pines"}),
        ]);
        let labels = collection(vec![json!({
            "type": "common_name", "identifier": "maple", "name": "Maple",
            "plant": {"type": "genus", "identifier": "acer"}
        })]);
        let cited = collection(vec![json!({"type": "plant", "identifier": "acer"})]);
        let presence: &[(PresenceFlag, &FlatCollection)] =
            &[(PresenceFlag::HasCitations, &cited)];

        let once = composer().compose(&[&genera], &labels, presence);
        let twice = composer().compose(&[&genera], &labels, presence);
        assert_eq!(once, twice);
    }
}
