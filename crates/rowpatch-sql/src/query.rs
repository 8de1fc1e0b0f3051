//! UPDATE statement assembly.

use rowpatch_diff::{decode_document, diff_flat, DiffError, Side};
use rowpatch_types::{DiffResult, ValueKind};
use serde_json::{Map, Value};
use tracing::debug;

use crate::condition::Condition;
use crate::error::{QueryError, Result};
use crate::field_map::FieldMap;
use crate::set_clause::{build_set_clause, quote_identifier, render_value};

/// Wrap a flat diff into a conditional UPDATE statement.
///
/// Identifier conditions read their value from `original` and render it
/// with the same literal rules as the SET clause. The condition is checked
/// before anything else, so an empty one always fails with
/// [`QueryError::NoCondition`]. An empty diff fails with
/// [`DiffError::NoDiff`] rather than rendering a statement with no
/// assignments.
pub fn assemble(
    table: &str,
    condition: &Condition,
    diff: &DiffResult,
    field_map: &FieldMap,
    original: &Map<String, Value>,
) -> Result<String> {
    if condition.is_empty() {
        return Err(QueryError::NoCondition);
    }
    if diff.is_empty() {
        return Err(DiffError::NoDiff.into());
    }

    let set = build_set_clause(diff, field_map)?;
    let table = quote_table(table);

    match condition {
        Condition::Identifier(field) => {
            let value = original
                .get(field)
                .ok_or_else(|| QueryError::MissingIdentifier {
                    field: field.clone(),
                })?;
            let rendered = match value {
                Value::String(_) | Value::Number(_) => render_value(value),
                other => {
                    return Err(QueryError::UnsupportedIdentifier {
                        field: field.clone(),
                        kind: ValueKind::of(other),
                    })
                }
            };
            Ok(format!(
                "UPDATE {table} SET {set} WHERE {}={rendered}",
                quote_identifier(field)
            ))
        }
        Condition::Clause(clause) => Ok(format!("UPDATE {table} SET {set} {clause}")),
    }
}

/// Decode two documents, diff their scalar fields and build the UPDATE
/// statement that applies the changes.
///
/// `condition` is parsed with [`Condition::parse`]; the empty string fails
/// with [`QueryError::NoCondition`] before either document is decoded.
pub fn build_patch_query(
    original: &[u8],
    new: &[u8],
    table: &str,
    condition: &str,
    field_map: &FieldMap,
) -> Result<String> {
    let condition = Condition::parse(condition)?;
    let original = decode_document(original, Side::Original)?;
    let new = decode_document(new, Side::New)?;

    let diff = diff_flat(&original, &new)?;
    let query = assemble(table, &condition, &diff, field_map, &original)?;
    debug!(table, fields = diff.len(), "assembled patch query");
    Ok(query)
}

/// Schema-qualified or already quoted table names pass through untouched.
fn quote_table(table: &str) -> String {
    if table.contains('.') {
        table.to_string()
    } else {
        quote_identifier(table)
    }
}
