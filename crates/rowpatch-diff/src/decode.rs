//! Decoding entry points: diff raw JSON bytes or loosely typed values.

use rowpatch_types::{DiffOptions, DiffResult, ValueKind};
use serde_json::{Map, Value};

use crate::error::{DiffError, Result, Side};
use crate::structural::diff_objects;

/// Decode one document, which must be a JSON object.
pub fn decode_document(bytes: &[u8], side: Side) -> Result<Map<String, Value>> {
    serde_json::from_slice(bytes).map_err(|source| DiffError::Decode { side, source })
}

/// Decode both documents and diff them.
pub fn diff_json(original: &[u8], new: &[u8], options: &DiffOptions) -> Result<DiffResult> {
    let original = decode_document(original, Side::Original)?;
    let new = decode_document(new, Side::New)?;
    diff_objects(&original, &new, options)
}

/// Diff two already decoded values. Both must be objects.
pub fn diff_values(original: &Value, new: &Value, options: &DiffOptions) -> Result<DiffResult> {
    let original = as_object(original, Side::Original)?;
    let new = as_object(new, Side::New)?;
    diff_objects(original, new, options)
}

fn as_object(value: &Value, side: Side) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| DiffError::NotAnObject {
        side,
        kind: ValueKind::of(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowpatch_types::{FieldChange, ReconciliationPolicy};
    use serde_json::json;

    #[test]
    fn decodes_and_diffs() {
        let diff = diff_json(
            br#"{"name":"John", "last_name":"Doe"}"#,
            br#"{"name":"Jane", "last_name":"Doe"}"#,
            &DiffOptions::default(),
        )
        .unwrap();
        assert_eq!(diff.get("name"), Some(&FieldChange::Value(json!("Jane"))));
    }

    #[test]
    fn malformed_original_names_its_side() {
        let err = diff_json(
            br#""name":"John", "last_name":"Doe", "age":32}"#,
            br#"{"name":"John","age": 36}"#,
            &DiffOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DiffError::Decode { side: Side::Original, .. }));
        assert!(err.to_string().starts_with("original document failed to decode"));
    }

    #[test]
    fn malformed_new_names_its_side() {
        let err = diff_json(br#"{"a":"x"}"#, b"{", &DiffOptions::default()).unwrap_err();
        assert!(matches!(err, DiffError::Decode { side: Side::New, .. }));
    }

    #[test]
    fn top_level_array_is_rejected() {
        let err = diff_json(b"[1]", br#"{"a":1}"#, &DiffOptions::default()).unwrap_err();
        assert!(matches!(err, DiffError::Decode { side: Side::Original, .. }));
    }

    #[test]
    fn values_must_be_objects() {
        let err = diff_values(&json!({"a": 1}), &json!("text"), &DiffOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DiffError::NotAnObject {
                side: Side::New,
                kind: ValueKind::String
            }
        ));
    }

    #[test]
    fn values_use_the_policy() {
        let options = DiffOptions::default().with_policy(ReconciliationPolicy::Replace);
        let diff = diff_values(
            &json!({"tags": ["a", "b", "c"]}),
            &json!({"tags": ["a", "b", "d"]}),
            &options,
        )
        .unwrap();
        assert_eq!(diff.to_value(), json!({"tags": ["a", "b", "d"]}));
    }
}
