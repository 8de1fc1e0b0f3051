//! Structural diff: compare two JSON objects field by field.
//!
//! Dispatch is on the kind of the new value:
//!
//! - numbers always surface when the key is present on both sides;
//! - arrays go through [`reconcile`], recursing into a single divergent
//!   object element when the divergence is structural;
//! - objects are compared one level deep and their changed children are
//!   hoisted into the outer result, so the output maps onto flat columns;
//! - strings, booleans and null surface when they differ, including the
//!   empty string (which clears a field).

use rowpatch_types::{
    arrays_equal, objects_equal, values_equal, DiffOptions, DiffResult, FieldChange,
    ReconciliationPolicy,
};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::array::{apply_policy, reconcile, Reconciliation};
use crate::error::{DiffError, Result};

/// Diff two objects with default options and the given array policy.
pub fn diff(
    original: &Map<String, Value>,
    new: &Map<String, Value>,
    policy: ReconciliationPolicy,
) -> Result<DiffResult> {
    diff_objects(original, new, &DiffOptions::default().with_policy(policy))
}

/// Compute the changes `new` introduces relative to `original`.
///
/// Fails with [`DiffError::NoDiff`] when nothing changed and with
/// [`DiffError::KeyConflict`] when a new key carries the same value as a
/// differently named original key. Neither input is modified.
pub fn diff_objects(
    original: &Map<String, Value>,
    new: &Map<String, Value>,
    options: &DiffOptions,
) -> Result<DiffResult> {
    if objects_equal(original, new) {
        return Err(DiffError::NoDiff);
    }
    diff_at_depth(original, new, options, 0)
}

fn diff_at_depth(
    original: &Map<String, Value>,
    new: &Map<String, Value>,
    options: &DiffOptions,
    depth: usize,
) -> Result<DiffResult> {
    if depth > options.max_depth {
        return Err(DiffError::TooDeep {
            limit: options.max_depth,
        });
    }
    check_key_conflicts(original, new)?;

    let mut diff = DiffResult::new();
    let mut hoisted = Vec::new();

    for (key, value) in new {
        let Some(previous) = original.get(key) else {
            continue;
        };

        match value {
            Value::Number(_) => diff.insert(key.as_str(), value.clone()),

            Value::Array(items) => {
                let Value::Array(previous_items) = previous else {
                    diff.insert(key.as_str(), FieldChange::Array(items.clone()));
                    continue;
                };
                match reconcile(previous_items, items, options.policy) {
                    Reconciliation::NoDivergence => {}
                    Reconciliation::Opaque(payload) => {
                        diff.insert(key.as_str(), FieldChange::Array(payload));
                    }
                    Reconciliation::Structural {
                        original: old_element,
                        new: new_element,
                    } => {
                        debug!(field = %key, depth, "recursing into divergent array element");
                        match diff_at_depth(old_element, new_element, options, depth + 1) {
                            Ok(nested) => diff.insert(key.as_str(), FieldChange::Nested(nested)),
                            Err(DiffError::NoDiff) => {
                                trace!(field = %key, "divergent element has no comparable changes");
                            }
                            Err(e) => return Err(e),
                        }
                    }
                }
            }

            Value::Object(children) => match previous {
                Value::Object(previous_children) => {
                    hoisted.extend(diff_children(previous_children, children, options.policy));
                }
                _ => diff.insert(key.as_str(), value.clone()),
            },

            Value::String(_) | Value::Bool(_) | Value::Null => {
                if !values_equal(value, previous) {
                    diff.insert(key.as_str(), value.clone());
                }
            }
        }
    }

    for (key, change) in hoisted {
        if !diff.insert_if_absent(key.as_str(), change) {
            debug!(field = %key, "nested field shadowed by a top-level change");
        }
    }

    if diff.is_empty() {
        return Err(DiffError::NoDiff);
    }
    Ok(diff)
}

/// One-level comparison of two nested objects.
///
/// Arrays are resolved by the policy alone; no further recursion happens
/// below this level.
fn diff_children(
    original: &Map<String, Value>,
    new: &Map<String, Value>,
    policy: ReconciliationPolicy,
) -> Vec<(String, FieldChange)> {
    let mut changes = Vec::new();
    for (key, value) in new {
        let Some(previous) = original.get(key) else {
            continue;
        };
        match (previous, value) {
            (Value::Array(previous_items), Value::Array(items)) => {
                if arrays_equal(previous_items, items) && policy != ReconciliationPolicy::Union {
                    continue;
                }
                let payload = apply_policy(previous_items, items, policy);
                changes.push((key.clone(), FieldChange::Array(payload)));
            }
            _ if !values_equal(value, previous) => changes.push((key.clone(), value.clone().into())),
            _ => {}
        }
    }
    changes
}

/// Reject a new key whose value equals the value of a differently named
/// original key. Every pair is checked before any field is compared.
pub(crate) fn check_key_conflicts(
    original: &Map<String, Value>,
    new: &Map<String, Value>,
) -> Result<()> {
    for (key, value) in new {
        let conflict = original
            .iter()
            .find(|(original_key, original_value)| {
                *original_key != key && values_equal(original_value, value)
            });
        if let Some((original_key, _)) = conflict {
            debug!(key = %key, original_key = %original_key, "key conflict detected");
            return Err(DiffError::KeyConflict {
                key: key.clone(),
                original_key: original_key.clone(),
            });
        }
    }
    Ok(())
}
