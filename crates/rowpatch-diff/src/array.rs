//! Array reconciliation: combine two arrays under a policy.
//!
//! Two arrays either match, diverge opaquely (the policy decides the
//! result), or diverge structurally: every differing element pair is a pair
//! of objects at the same index. Only the first such pair is handed back for
//! recursive diffing; later divergent object pairs are not reported.
//!
//! Elements compare with [`values_equal`], so `1` and `1.0` match.

use rowpatch_types::{arrays_equal, values_equal, ReconciliationPolicy};
use serde_json::{Map, Value};

/// Outcome of comparing two arrays.
#[derive(Clone, Debug, PartialEq)]
pub enum Reconciliation<'a> {
    /// The arrays are equal; the field carries no change.
    NoDivergence,
    /// The arrays differ as plain values; the payload is the policy result.
    Opaque(Vec<Value>),
    /// Only object elements differ; this is the first divergent pair.
    Structural {
        original: &'a Map<String, Value>,
        new: &'a Map<String, Value>,
    },
}

/// Compare two arrays and decide how their divergence is resolved.
///
/// `Union` never reports `NoDivergence`: equal arrays are still
/// concatenated. Any differing pair that is not two objects makes the
/// divergence opaque.
pub fn reconcile<'a>(
    original: &'a [Value],
    new: &'a [Value],
    policy: ReconciliationPolicy,
) -> Reconciliation<'a> {
    if arrays_equal(original, new) {
        return match policy {
            ReconciliationPolicy::Union => {
                Reconciliation::Opaque(apply_policy(original, new, policy))
            }
            _ => Reconciliation::NoDivergence,
        };
    }

    if original.len() != new.len() {
        return Reconciliation::Opaque(apply_policy(original, new, policy));
    }

    let mut divergent = None;
    for (old_item, new_item) in original.iter().zip(new) {
        if values_equal(old_item, new_item) {
            continue;
        }
        match (old_item, new_item) {
            (Value::Object(o), Value::Object(n)) => {
                if divergent.is_none() {
                    divergent = Some((o, n));
                }
            }
            _ => return Reconciliation::Opaque(apply_policy(original, new, policy)),
        }
    }

    match divergent {
        Some((original, new)) => Reconciliation::Structural { original, new },
        None => Reconciliation::NoDivergence,
    }
}

/// Combine two arrays according to `policy`.
pub fn apply_policy(
    original: &[Value],
    new: &[Value],
    policy: ReconciliationPolicy,
) -> Vec<Value> {
    match policy {
        ReconciliationPolicy::Merge => {
            let mut merged = original.to_vec();
            merged.extend(
                new.iter()
                    .filter(|item| !original.iter().any(|o| values_equal(o, item)))
                    .cloned(),
            );
            merged
        }
        ReconciliationPolicy::Replace => new.to_vec(),
        ReconciliationPolicy::Union => {
            let mut merged = Vec::with_capacity(original.len() + new.len());
            merged.extend_from_slice(original);
            merged.extend_from_slice(new);
            merged
        }
    }
}
