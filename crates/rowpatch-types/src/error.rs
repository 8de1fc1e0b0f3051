use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown reconciliation policy '{0}' (expected merge, replace or union)")]
    UnknownPolicy(String),
}
