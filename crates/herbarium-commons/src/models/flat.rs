//! Flat, sorted collections of enveloped nodes
//!
//! Every flattening and joining stage hands its result downstream as a
//! `FlatCollection`. The constructor enforces the two collection rules:
//! entries are sorted by identifier (byte-wise, stable), and duplicate
//! `(type, identifier)` pairs are dropped keeping the first occurrence in
//! input order.

use crate::models::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Wrapper holding one node under a `data` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Record,
}

impl Envelope {
    pub fn new(data: Record) -> Self {
        Envelope { data }
    }
}

/// Sorted list of enveloped nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatCollection(Vec<Envelope>);

impl FlatCollection {
    /// Wrap records in envelopes, then sort and deduplicate
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::from_envelopes(records.into_iter().map(Envelope::new).collect())
    }

    /// Sort and deduplicate already-enveloped nodes
    ///
    /// # Arguments
    /// * `envelopes` - Nodes in discovery order; ties between equal
    ///   identifiers keep this order after the stable sort
    pub fn from_envelopes(envelopes: Vec<Envelope>) -> Self {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut kept: Vec<Envelope> = Vec::with_capacity(envelopes.len());

        for envelope in envelopes {
            if let Some(identity) = envelope.data.identity() {
                let key = (
                    identity.node_type.to_string(),
                    identity.identifier.to_string(),
                );
                if !seen.insert(key) {
                    log::debug!(
                        "Dropping duplicate {} node '{}'",
                        identity.node_type,
                        identity.identifier
                    );
                    continue;
                }
            }
            kept.push(envelope);
        }

        kept.sort_by(|a, b| {
            let left = a.data.identifier().unwrap_or("");
            let right = b.data.identifier().unwrap_or("");
            left.cmp(right)
        });

        FlatCollection(kept)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Envelope> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Envelope> {
        self.0.iter()
    }

    /// Iterate over the wrapped records directly
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.0.iter().map(|envelope| &envelope.data)
    }

    /// Identifiers in collection order, used in logs and assertions
    pub fn identifiers(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter_map(|envelope| envelope.data.identifier())
            .collect()
    }

    pub fn as_slice(&self) -> &[Envelope] {
        &self.0
    }
}

impl IntoIterator for FlatCollection {
    type Item = Envelope;
    type IntoIter = std::vec::IntoIter<Envelope>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatCollection {
    type Item = &'a Envelope;
    type IntoIter = std::slice::Iter<'a, Envelope>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
