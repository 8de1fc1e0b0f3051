//! Error types for the diff crate.

use std::fmt;

use rowpatch_types::ValueKind;

/// Which of the two compared documents an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Original,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => f.write_str("original"),
            Side::New => f.write_str("new"),
        }
    }
}

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The documents are identical under the comparison rules.
    #[error("there are no differences between the documents")]
    NoDiff,

    /// A new key holds a value equal to a differently named original key.
    #[error("key '{key}' holds the same value as original key '{original_key}'")]
    KeyConflict { key: String, original_key: String },

    /// Structural recursion went deeper than the configured limit.
    #[error("structural recursion exceeded the maximum depth of {limit}")]
    TooDeep { limit: usize },

    /// A document could not be decoded as a JSON object.
    #[error("{side} document failed to decode: {source}")]
    Decode {
        side: Side,
        #[source]
        source: serde_json::Error,
    },

    /// A decoded document was not an object.
    #[error("{side} document is a {kind}, expected an object")]
    NotAnObject { side: Side, kind: ValueKind },
}

impl DiffError {
    /// Returns `true` for the "nothing changed" outcome, which callers
    /// usually treat as a result rather than a failure.
    pub fn is_no_diff(&self) -> bool {
        matches!(self, DiffError::NoDiff)
    }
}

/// Convenience alias for diff results.
pub type Result<T, E = DiffError> = std::result::Result<T, E>;
