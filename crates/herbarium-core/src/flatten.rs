//! Tree flattening
//!
//! Three ways of turning nested source documents into flat collections:
//!
//! - **Root-path mode**: descend a fixed path and keep the list found
//!   there, either as bare nodes or as pre-enveloped `data` wrappers
//! - **Depth-bounded mode**: walk the subtree and keep typed nodes sitting
//!   at the requested depths, one full walk per level
//! - **Element extraction**: pull inline `"<type>_items"` children out of
//!   an already-flat parent collection
//!
//! All modes validate nodes through `Record::identity` and silently skip
//! anything malformed; a bad node never fails the build.

use herbarium_commons::constants::{FIELD_DATA, FIELD_PARENT_TYPE};
use herbarium_commons::{Envelope, FlatCollection, Record};
use serde_json::Value;

/// How the elements under the root path are shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootPathMode {
    /// Elements are bare nodes; only those with a non-empty name are kept
    NamedNodes,
    /// Elements already carry a `data` wrapper around the node
    Enveloped,
}

/// Walk a path of object keys down from the document root
///
/// # Returns
/// The value at the end of the path, or `None` as soon as a segment is
/// missing or the current value is not an object.
pub fn descend<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}

/// Flatten the list found at a fixed path
///
/// # Arguments
/// * `doc` - Source document
/// * `path` - Object keys from the root down to the list
/// * `target_type` - Node type to keep; everything else is skipped
/// * `mode` - Shape of the list elements
pub fn flatten_root_path(
    doc: &Value,
    path: &[&str],
    target_type: &str,
    mode: RootPathMode,
) -> FlatCollection {
    let elements = match descend(doc, path).and_then(Value::as_array) {
        Some(elements) => elements,
        None => {
            log::debug!("No list at /{} in source document", path.join("/"));
            return FlatCollection::default();
        }
    };

    let mut envelopes = Vec::new();
    for element in elements {
        let record = match mode {
            RootPathMode::NamedNodes => Record::from_value(element),
            RootPathMode::Enveloped => element.get(FIELD_DATA).and_then(Record::from_value),
        };
        let record = match record {
            Some(record) => record,
            None => continue,
        };

        let type_matches = record
            .identity()
            .map(|identity| identity.node_type == target_type)
            .unwrap_or(false);
        if !type_matches {
            continue;
        }
        if mode == RootPathMode::NamedNodes && record.name().is_none() {
            continue;
        }
        envelopes.push(Envelope::new(record));
    }
    FlatCollection::from_envelopes(envelopes)
}

/// Collect typed nodes found at the requested depths of a subtree
///
/// Depth counts object-value descents from the subtree root (the root
/// itself is depth zero); arrays and scalars are leaves. One full walk
/// runs per requested level, so each level is considered independently.
pub fn flatten_at_levels(
    doc: &Value,
    path: &[&str],
    target_type: &str,
    levels: &[usize],
) -> FlatCollection {
    let root = match descend(doc, path) {
        Some(root) => root,
        None => {
            log::debug!("No subtree at /{} in source document", path.join("/"));
            return FlatCollection::default();
        }
    };

    let mut found = Vec::new();
    for &level in levels {
        collect_at_level(root, level, target_type, &mut found);
    }
    FlatCollection::from_records(found)
}

fn collect_at_level(value: &Value, remaining: usize, target_type: &str, out: &mut Vec<Record>) {
    if remaining == 0 {
        if let Some(record) = Record::from_value(value) {
            let type_matches = record
                .identity()
                .map(|identity| identity.node_type == target_type)
                .unwrap_or(false);
            if type_matches {
                out.push(record);
            }
        }
        return;
    }
    if let Some(map) = value.as_object() {
        for child in map.values() {
            collect_at_level(child, remaining - 1, target_type, out);
        }
    }
}

/// Pull the inline `"<type>_items"` children out of each parent
///
/// # Arguments
/// * `parents` - Already-flat collection of parent nodes
/// * `child_type` - Child type whose item lists are collected
/// * `stamp_parent_type` - When true, each child gets a `parent_type`
///   field naming its parent's type
///
/// # Returns
/// The children of all parents as one collection; children shared by
/// several parents collapse to the first occurrence.
pub fn extract_child_items(
    parents: &FlatCollection,
    child_type: &str,
    stamp_parent_type: bool,
) -> FlatCollection {
    let mut children = Vec::new();
    for parent in parents.records() {
        let items = match parent.items_of(child_type) {
            Some(items) => items,
            None => continue,
        };
        for item in items {
            let mut child = match Record::from_value(item) {
                Some(child) => child,
                None => continue,
            };
            if child.identity().is_none() {
                continue;
            }
            if stamp_parent_type {
                if let Some(parent_type) = parent.node_type() {
                    child.set(FIELD_PARENT_TYPE, Value::String(parent_type.to_string()));
                }
            }
            children.push(child);
        }
    }
    FlatCollection::from_records(children)
}
