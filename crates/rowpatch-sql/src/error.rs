//! Error types for SQL rendering.

use rowpatch_diff::DiffError;
use rowpatch_types::ValueKind;

/// Errors that can occur while building a patch query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// No condition was supplied; unconditional updates are never produced.
    #[error("patch query requires a condition")]
    NoCondition,

    /// Comparing the documents failed.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// The identifier used as condition is absent from the original document.
    #[error("identifier field '{field}' is missing from the original document")]
    MissingIdentifier { field: String },

    /// The identifier holds a value that cannot be used in an equality condition.
    #[error("identifier field '{field}' is a {kind}, expected a string or number")]
    UnsupportedIdentifier { field: String, kind: ValueKind },

    /// The diff still contains a nested change and cannot map onto columns.
    #[error("field '{field}' holds a nested change and has no column form")]
    NestedChange { field: String },
}

impl QueryError {
    /// Returns `true` when the underlying documents did not differ.
    pub fn is_no_diff(&self) -> bool {
        matches!(self, QueryError::Diff(e) if e.is_no_diff())
    }
}

/// Convenience alias for query results.
pub type Result<T, E = QueryError> = std::result::Result<T, E>;
