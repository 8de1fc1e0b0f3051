//! Foundation types for rowpatch.
//!
//! This crate provides the data model shared by the differ, the SQL builder,
//! and the command-line front end. Documents themselves are plain
//! [`serde_json::Value`] trees; everything here describes what happens to them.
//!
//! # Key Types
//!
//! - [`DiffResult`] / [`FieldChange`] — The minimal mapping of changed fields
//! - [`ReconciliationPolicy`] — How two divergent arrays are combined
//! - [`DiffOptions`] — Per-invocation configuration (policy, recursion limit)
//! - [`ValueKind`] — Tag of a decoded JSON value

pub mod change;
pub mod error;
pub mod policy;
pub mod value;

pub use change::{DiffResult, FieldChange};
pub use error::TypeError;
pub use policy::{DiffOptions, ReconciliationPolicy, DEFAULT_MAX_DEPTH};
pub use value::{arrays_equal, objects_equal, values_equal, ValueKind};
