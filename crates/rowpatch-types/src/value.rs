use std::fmt;

use serde_json::{Map, Number, Value};

/// The tag of a decoded JSON value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns `true` for kinds that map onto a single column value.
    pub fn is_scalar(self) -> bool {
        !matches!(self, Self::Array | Self::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deep equality where numbers compare by value.
///
/// `1` and `1.0` are equal. Two integers compare exactly, so large ids do
/// not lose precision through a float conversion.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => arrays_equal(x, y),
        (Value::Object(x), Value::Object(y)) => objects_equal(x, y),
        _ => a == b,
    }
}

pub fn arrays_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
}

pub fn objects_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_every_kind() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(false)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn scalar_kinds() {
        assert!(ValueKind::Null.is_scalar());
        assert!(ValueKind::String.is_scalar());
        assert!(!ValueKind::Array.is_scalar());
        assert!(!ValueKind::Object.is_scalar());
    }

    #[test]
    fn integer_and_float_numbers_are_equal() {
        assert!(values_equal(&json!(10), &json!(10.0)));
        assert!(values_equal(&json!(-3), &json!(-3.0)));
        assert!(!values_equal(&json!(10), &json!(10.5)));
        assert!(!values_equal(&json!(10), &json!("10")));
    }

    #[test]
    fn large_integers_compare_exactly() {
        assert!(values_equal(
            &json!(1014336373145370625u64),
            &json!(1014336373145370625u64)
        ));
        assert!(!values_equal(
            &json!(1014336373145370625u64),
            &json!(1014336373145370624u64)
        ));
    }

    #[test]
    fn equality_recurses_into_containers() {
        assert!(values_equal(
            &json!({"a": [1, {"b": 2.0}], "c": null}),
            &json!({"c": null, "a": [1.0, {"b": 2}]})
        ));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!values_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!values_equal(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn display_names() {
        assert_eq!(ValueKind::Bool.to_string(), "boolean");
        assert_eq!(ValueKind::Object.to_string(), "object");
    }
}
