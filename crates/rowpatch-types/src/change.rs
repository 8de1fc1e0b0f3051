//! The differ's output: a minimal mapping of changed fields.

use std::collections::btree_map::{self, BTreeMap, Entry};

use serde::Serialize;
use serde_json::{Map, Value};

/// A single changed field.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldChange {
    /// The new scalar (or wholesale replacement) value of the field.
    Value(Value),
    /// A reconciled array produced by the active policy.
    Array(Vec<Value>),
    /// The diff of a nested object that diverged structurally inside an array.
    Nested(DiffResult),
}

impl FieldChange {
    /// Returns `true` unless this change holds a nested diff.
    pub fn is_flat(&self) -> bool {
        !matches!(self, Self::Nested(_))
    }

    /// Convert into a plain JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Value(v) => v.clone(),
            Self::Array(items) => Value::Array(items.clone()),
            Self::Nested(diff) => diff.to_value(),
        }
    }
}

impl From<Value> for FieldChange {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Mapping from field name to the change applied to that field.
///
/// Keys are kept in byte-wise ascending order, so iteration and
/// serialization are deterministic. A `DiffResult` handed out by the differ
/// is never empty: "nothing changed" is reported as an error instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiffResult {
    fields: BTreeMap<String, FieldChange>,
}

impl DiffResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field changed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of changed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Record a change, replacing any earlier change to the same field.
    pub fn insert(&mut self, field: impl Into<String>, change: impl Into<FieldChange>) {
        self.fields.insert(field.into(), change.into());
    }

    /// Record a change only if the field has no change yet.
    ///
    /// Returns `false` when an existing entry was kept.
    pub fn insert_if_absent(
        &mut self,
        field: impl Into<String>,
        change: impl Into<FieldChange>,
    ) -> bool {
        match self.fields.entry(field.into()) {
            Entry::Vacant(slot) => {
                slot.insert(change.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Changed field names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldChange> {
        self.fields.iter()
    }

    /// Returns `true` if no change holds a nested diff.
    pub fn is_flat(&self) -> bool {
        self.fields.values().all(FieldChange::is_flat)
    }

    /// Convert into a JSON object.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, c)| (k.clone(), c.to_value()))
            .collect();
        Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = (&'a String, &'a FieldChange);
    type IntoIter = btree_map::Iter<'a, String, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for DiffResult {
    type Item = (String, FieldChange);
    type IntoIter = btree_map::IntoIter<String, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<K: Into<String>, C: Into<FieldChange>> FromIterator<(K, C)> for DiffResult {
    fn from_iter<T: IntoIterator<Item = (K, C)>>(iter: T) -> Self {
        let mut diff = Self::new();
        for (field, change) in iter {
            diff.insert(field, change);
        }
        diff
    }
}
