use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from document field names to rendered column names.
///
/// Fields without an entry render under their own name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.0.insert(field.into(), column.into());
    }

    /// The column a field renders to.
    pub fn column_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.0.get(field).map(String::as_str).unwrap_or(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, column)| (field.into(), column.into()))
                .collect(),
        )
    }
}

impl Extend<(String, String)> for FieldMap {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_fields_keep_their_name() {
        let map: FieldMap = [("last_name", "lastName")].into_iter().collect();
        assert_eq!(map.column_for("last_name"), "lastName");
        assert_eq!(map.column_for("name"), "name");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn deserializes_from_table() {
        let map: FieldMap = toml::from_str("name = \"Name\"\nage = \"Age\"").unwrap();
        assert_eq!(map.column_for("age"), "Age");
        assert_eq!(map.column_for("name"), "Name");
    }
}
