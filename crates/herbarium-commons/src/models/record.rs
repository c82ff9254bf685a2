//! Loosely-typed source nodes with typed accessors
//!
//! Source documents arrive as free-form JSON. `Record` wraps one JSON
//! object and exposes the fields the pipeline cares about through typed
//! accessors, so stages validate shape once instead of re-checking raw
//! JSON everywhere. Accessors return `Option` because a malformed node is
//! skipped at the smallest possible scope, never turned into a build error.

use crate::constants::{
    FIELD_ARCHIVAL_ID, FIELD_IDENTIFIER, FIELD_NAME, FIELD_TYPE, ITEMS_SUFFIX,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Borrowed view of the two fields every pipeline participant must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIdentity<'a> {
    pub node_type: &'a str,
    pub identifier: &'a str,
}

/// A single source node held as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record(fields)
    }

    /// Build a record from a JSON value, returning `None` for non-objects
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|map| Record(map.clone()))
    }

    /// Raw field access
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String field access, `None` when missing or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Node kind (e.g. "family", "nursery")
    pub fn node_type(&self) -> Option<&str> {
        self.get_str(FIELD_TYPE)
    }

    /// Machine-readable identifier
    pub fn identifier(&self) -> Option<&str> {
        self.get_str(FIELD_IDENTIFIER)
    }

    /// Display name, `None` when missing or empty
    pub fn name(&self) -> Option<&str> {
        self.get_str(FIELD_NAME).filter(|name| !name.is_empty())
    }

    /// Numeric key from the legacy archive
    pub fn archival_id(&self) -> Option<i64> {
        self.get(FIELD_ARCHIVAL_ID).and_then(Value::as_i64)
    }

    /// Type and identifier together, `None` when either is missing
    ///
    /// # Returns
    /// A borrowed identity view; nodes without one do not participate in
    /// flattening, joining, or composition.
    pub fn identity(&self) -> Option<NodeIdentity<'_>> {
        match (self.node_type(), self.identifier()) {
            (Some(node_type), Some(identifier)) => Some(NodeIdentity {
                node_type,
                identifier,
            }),
            _ => None,
        }
    }

    /// Field name of the inline child list for a child type
    pub fn items_field(child_type: &str) -> String {
        format!("{}{}", child_type, ITEMS_SUFFIX)
    }

    /// Inline child list for a child type, `None` when missing or not a list
    pub fn items_of(&self, child_type: &str) -> Option<&Vec<Value>> {
        self.0
            .get(&Record::items_field(child_type))
            .and_then(Value::as_array)
    }

    /// Set or replace a field
    pub fn set<S: Into<String>>(&mut self, key: S, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Attach an item list under the `"<type>_items"` convention
    pub fn set_items_of(&mut self, child_type: &str, items: Vec<Value>) {
        self.0
            .insert(Record::items_field(child_type), Value::Array(items));
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record and return it as a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
