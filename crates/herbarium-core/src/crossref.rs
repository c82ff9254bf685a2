//! Category cross-referencing
//!
//! Joins a source collection onto the categories its entries reference.
//! Each source entry may carry several category references; the join
//! produces, per category, the list of source entries tagged with that
//! category, attached under the `"<item_type>_items"` convention. An entry
//! referencing several categories appears in each of them.

use herbarium_commons::constants::{FIELD_IDENTIFIER, FIELD_TYPE};
use herbarium_commons::FlatCollection;
use serde_json::Value;
use std::collections::BTreeMap;

/// Join `source` entries onto `target` categories
///
/// # Arguments
/// * `source` - Entries carrying category references under `category_field`
/// * `target` - Canonical category nodes receiving the joined lists
/// * `category_field` - Source field holding the list of category references
/// * `item_type` - Category type; the attached field is `"<item_type>_items"`
///
/// # Returns
/// The target collection with every category decorated, including
/// categories no entry references (they keep an empty list).
pub fn join_by_category(
    source: &FlatCollection,
    target: &FlatCollection,
    category_field: &str,
    item_type: &str,
) -> FlatCollection {
    // Reverse mapping: category identifier -> tagged source entries
    let mut buckets: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for entry in source.records() {
        let references = match entry.get(category_field).and_then(Value::as_array) {
            Some(references) if !references.is_empty() => references,
            _ => continue,
        };
        for reference in references {
            let category_id = match category_reference_id(reference) {
                Some(category_id) => category_id,
                None => continue,
            };
            let mut tagged = entry.clone();
            tagged.set(item_type, Value::String(category_id.clone()));
            buckets
                .entry(category_id)
                .or_default()
                .push(tagged.into_value());
        }
    }

    let mut decorated = Vec::new();
    for category in target.records() {
        let members = category
            .identifier()
            .and_then(|identifier| buckets.get(identifier))
            .cloned()
            .unwrap_or_default();
        let mut joined = category.clone();
        joined.set_items_of(item_type, members);
        decorated.push(joined);
    }
    FlatCollection::from_records(decorated)
}

/// Identifier of a category reference; requires both type and identifier
fn category_reference_id(reference: &Value) -> Option<String> {
    let map = reference.as_object()?;
    let identifier = map.get(FIELD_IDENTIFIER).and_then(Value::as_str)?;
    map.get(FIELD_TYPE).and_then(Value::as_str)?;
    Some(identifier.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbarium_commons::Record;
    use serde_json::json;

    fn collection(values: Vec<Value>) -> FlatCollection {
        FlatCollection::from_records(
            values
                .iter()
                .map(|value| Record::from_value(value).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_join_attaches_tagged_members() {
        let source = collection(vec![json!({
            "type": "item",
            "identifier": "x",
            "categories": [{"type": "cat", "identifier": "red"}]
        })]);
        let target = collection(vec![json!({"type": "cat", "identifier": "red", "name": "Red"})]);

        let joined = join_by_category(&source, &target, "categories", "cat");
        assert_eq!(joined.len(), 1);

        let red = &joined.get(0).unwrap().data;
        let members = red.items_of("cat").unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0]["identifier"], "x");
        // The member is the source entry tagged with the category it joined
        assert_eq!(members[0]["cat"], "red");
    }

    #[test]
    fn test_category_without_members_keeps_empty_list() {
        let source = collection(vec![json!({"type": "item", "identifier": "x"})]);
        let target = collection(vec![json!({"type": "cat", "identifier": "lonely"})]);

        let joined = join_by_category(&source, &target, "categories", "cat");
        let lonely = &joined.get(0).unwrap().data;
        assert_eq!(lonely.items_of("cat").unwrap().len(), 0);
    }

    #[test]
    fn test_entry_in_many_categories_lands_in_each() {
        let source = collection(vec![json!({
            "type": "item",
            "identifier": "both",
            "categories": [
                {"type": "cat", "identifier": "red"},
                {"type": "cat", "identifier": "blue"}
            ]
        })]);
        let target = collection(vec![
            json!({"type": "cat", "identifier": "red"}),
            json!({"type": "cat", "identifier": "blue"}),
        ]);

        let joined = join_by_category(&source, &target, "categories", "cat");
        for envelope in joined.iter() {
            let members = envelope.data.items_of("cat").unwrap();
            assert_eq!(members.len(), 1);
            assert_eq!(members[0]["identifier"], "both");
        }
    }

    #[test]
    fn test_references_missing_identity_are_skipped() {
        let source = collection(vec![json!({
            "type": "item",
            "identifier": "x",
            "categories": [
                {"identifier": "untyped"},
                {"type": "cat"},
                "not an object",
                {"type": "cat", "identifier": "valid"}
            ]
        })]);
        let target = collection(vec![
            json!({"type": "cat", "identifier": "untyped"}),
            json!({"type": "cat", "identifier": "valid"}),
        ]);

        let joined = join_by_category(&source, &target, "categories", "cat");
        let untyped = &joined.get(0).unwrap().data;
        assert_eq!(untyped.items_of("cat").unwrap().len(), 0);
        let valid = &joined.get(1).unwrap().data;
        assert_eq!(valid.items_of("cat").unwrap().len(), 1);
    }

    #[test]
    fn test_every_reference_pair_is_preserved() {
        let source = collection(vec![
            json!({"type": "item", "identifier": "a", "categories": [
                {"type": "cat", "identifier": "red"}
            ]}),
            json!({"type": "item", "identifier": "b", "categories": [
                {"type": "cat", "identifier": "red"},
                {"type": "cat", "identifier": "blue"}
            ]}),
            json!({"type": "item", "identifier": "c", "categories": []}),
        ]);
        let target = collection(vec![
            json!({"type": "cat", "identifier": "red"}),
            json!({"type": "cat", "identifier": "blue"}),
        ]);

        let joined = join_by_category(&source, &target, "categories", "cat");
        let attached: usize = joined
            .records()
            .map(|category| category.items_of("cat").map(Vec::len).unwrap_or(0))
            .sum();
        // One pair per (entry, reference): a-red, b-red, b-blue
        assert_eq!(attached, 3);
    }

    #[test]
    fn test_members_follow_source_collection_order() {
        let source = collection(vec![
            json!({"type": "item", "identifier": "zebra", "categories": [
                {"type": "cat", "identifier": "red"}
            ]}),
            json!({"type": "item", "identifier": "aardvark", "categories": [
                {"type": "cat", "identifier": "red"}
            ]}),
        ]);
        let target = collection(vec![json!({"type": "cat", "identifier": "red"})]);

        let joined = join_by_category(&source, &target, "categories", "cat");
        let members = joined.get(0).unwrap().data.items_of("cat").unwrap().clone();
        // Source collection is sorted, so members arrive in identifier order
        assert_eq!(members[0]["identifier"], "aardvark");
        assert_eq!(members[1]["identifier"], "zebra");
    }
}
