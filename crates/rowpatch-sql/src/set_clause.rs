//! SET clause rendering.

use rowpatch_types::{DiffResult, FieldChange};
use serde_json::Value;

use crate::error::{QueryError, Result};
use crate::field_map::FieldMap;

/// Render a flat diff as the body of a SQL SET clause.
///
/// Entries are ordered by field name (byte-wise ascending), renamed through
/// `field_map`, and joined with `", "`. A nested change has no column form
/// and fails with [`QueryError::NestedChange`].
pub fn build_set_clause(diff: &DiffResult, field_map: &FieldMap) -> Result<String> {
    let mut assignments = Vec::with_capacity(diff.len());
    // DiffResult iterates in key order.
    for (field, change) in diff {
        let value = match change {
            FieldChange::Value(value) => render_value(value),
            FieldChange::Array(items) => quote_literal(&Value::Array(items.clone()).to_string()),
            FieldChange::Nested(_) => {
                return Err(QueryError::NestedChange {
                    field: field.clone(),
                })
            }
        };
        let column = quote_identifier(field_map.column_for(field));
        assignments.push(format!("{column}={value}"));
    }
    Ok(assignments.join(", "))
}

/// Render a value as a SQL literal.
///
/// Strings are single-quoted, numbers and booleans use their canonical text,
/// null becomes `NULL`, and arrays or objects become a quoted JSON literal.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_literal(s),
        Value::Array(_) | Value::Object(_) => quote_literal(&value.to_string()),
    }
}

/// Wrap text in single quotes, doubling embedded quotes.
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Wrap a column name in double quotes unless it is already quoted.
pub fn quote_identifier(name: &str) -> String {
    if name.starts_with('"') {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn flat(value: Value) -> DiffResult {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn sorted_and_quoted() {
        let diff = flat(json!({"name": "Gonza", "age": 20}));
        let set = build_set_clause(&diff, &FieldMap::new()).unwrap();
        assert_eq!(set, r#""age"=20, "name"='Gonza'"#);
    }

    #[test]
    fn applies_field_map() {
        let diff = flat(json!({"name": "Gonza", "age": 20, "country": "Greenland"}));
        let map: FieldMap = [("name", "Name"), ("age", "Age")].into_iter().collect();
        let set = build_set_clause(&diff, &map).unwrap();
        assert_eq!(set, r#""Age"=20, "country"='Greenland', "Name"='Gonza'"#);
    }

    #[test]
    fn pre_quoted_column_is_kept() {
        let diff = flat(json!({"name": "resources manager"}));
        let map: FieldMap = [("name", r#""name""#)].into_iter().collect();
        let set = build_set_clause(&diff, &map).unwrap();
        assert_eq!(set, r#""name"='resources manager'"#);
    }

    #[test]
    fn renders_every_scalar_kind() {
        let diff = flat(json!({
            "a": "",
            "b": true,
            "c": null,
            "d": 1.5,
            "e": -3,
            "f": "it's"
        }));
        let set = build_set_clause(&diff, &FieldMap::new()).unwrap();
        assert_eq!(
            set,
            r#""a"='', "b"=true, "c"=NULL, "d"=1.5, "e"=-3, "f"='it''s'"#
        );
    }

    #[test]
    fn arrays_render_as_json_literals() {
        let mut diff = DiffResult::new();
        diff.insert("tags", FieldChange::Array(vec![json!("a"), json!("b")]));
        let set = build_set_clause(&diff, &FieldMap::new()).unwrap();
        assert_eq!(set, r#""tags"='["a","b"]'"#);
    }

    #[test]
    fn large_integers_keep_precision() {
        let diff = flat(json!({"team_id": 1014110679220617217u64}));
        let set = build_set_clause(&diff, &FieldMap::new()).unwrap();
        assert_eq!(set, r#""team_id"=1014110679220617217"#);
    }

    #[test]
    fn nested_change_is_rejected() {
        let mut diff = DiffResult::new();
        diff.insert("meta", FieldChange::Nested(flat(json!({"age": 41}))));
        let err = build_set_clause(&diff, &FieldMap::new()).unwrap_err();
        assert!(matches!(err, QueryError::NestedChange { field } if field == "meta"));
    }

    proptest! {
        #[test]
        fn output_ignores_insertion_order(
            entries in prop::collection::vec(("[a-zA-Z_]{1,8}", "[a-z ]{0,8}"), 1..10)
        ) {
            let forward: DiffResult = entries
                .iter()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();
            let mut reversed = DiffResult::new();
            for (k, v) in entries.iter().rev() {
                // Walking backwards, the first sighting is the value that wins.
                reversed.insert_if_absent(k.clone(), json!(v));
            }

            let map = FieldMap::new();
            let first = build_set_clause(&forward, &map).unwrap();
            prop_assert_eq!(&first, &build_set_clause(&forward, &map).unwrap());
            prop_assert_eq!(first, build_set_clause(&reversed, &map).unwrap());
        }
    }
}
