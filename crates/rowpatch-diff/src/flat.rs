//! Flat diff: single-level scalar comparison for column updates.

use rowpatch_types::{objects_equal, values_equal, DiffResult, ValueKind};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{DiffError, Result};
use crate::structural::check_key_conflicts;

/// Compare only the scalar fields of two objects.
///
/// Numbers surface whenever the key is present on both sides; strings,
/// booleans and null surface when they differ. Arrays and objects do not map
/// onto a single column and are skipped. The key conflict guard is the same
/// as for [`diff_objects`](crate::diff_objects).
pub fn diff_flat(original: &Map<String, Value>, new: &Map<String, Value>) -> Result<DiffResult> {
    if objects_equal(original, new) {
        return Err(DiffError::NoDiff);
    }
    check_key_conflicts(original, new)?;

    let mut diff = DiffResult::new();
    for (key, value) in new {
        let Some(previous) = original.get(key) else {
            continue;
        };
        let kind = ValueKind::of(value);
        if !kind.is_scalar() {
            trace!(field = %key, %kind, "skipping non-scalar field");
            continue;
        }
        if kind == ValueKind::Number || !values_equal(value, previous) {
            diff.insert(key.as_str(), value.clone());
        }
    }

    if diff.is_empty() {
        return Err(DiffError::NoDiff);
    }
    Ok(diff)
}
