//! Structural differ for rowpatch.
//!
//! Compares an original JSON document against a new one and produces the
//! minimal set of field-level changes the new document introduces. Only
//! fields present on both sides are compared: the result describes a
//! one-directional patch from `original` towards `new`.
//!
//! # Key Functions
//!
//! - [`diff_objects`] / [`diff_json`] -- Recursive structural diff
//! - [`diff_flat`] -- Single-level scalar diff suited to column updates
//! - [`reconcile`] / [`apply_policy`] -- Array reconciliation
//!
//! # Example
//!
//! ```
//! use rowpatch_diff::diff_json;
//! use rowpatch_types::{DiffOptions, FieldChange};
//! use serde_json::json;
//!
//! let diff = diff_json(
//!     br#"{"name":"John","last_name":"Doe"}"#,
//!     br#"{"name":"Jane","last_name":"Doe"}"#,
//!     &DiffOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(diff.get("name"), Some(&FieldChange::Value(json!("Jane"))));
//! assert_eq!(diff.len(), 1);
//! ```

pub mod array;
pub mod decode;
pub mod error;
pub mod flat;
pub mod structural;

pub use array::{apply_policy, reconcile, Reconciliation};
pub use decode::{decode_document, diff_json, diff_values};
pub use error::{DiffError, Result, Side};
pub use flat::diff_flat;
pub use structural::{diff, diff_objects};
