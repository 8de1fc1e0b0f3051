//! SQL rendering for rowpatch.
//!
//! Turns a flat [`DiffResult`](rowpatch_types::DiffResult) into the SET
//! clause of an `UPDATE` statement and wraps it with a mandatory condition.
//! Output is deterministic: columns appear in byte-wise key order no matter
//! how the input documents were ordered.
//!
//! Values are quoted, not sanitized. Callers remain responsible for what
//! they feed in.
//!
//! ```
//! use rowpatch_sql::{build_patch_query, FieldMap};
//!
//! let query = build_patch_query(
//!     br#"{"id": 1234, "name": "Gonzalo", "age": 19}"#,
//!     br#"{"name": "Gonza", "age": 20}"#,
//!     "user",
//!     "id",
//!     &FieldMap::new(),
//! )
//! .unwrap();
//! assert_eq!(query, r#"UPDATE "user" SET "age"=20, "name"='Gonza' WHERE "id"=1234"#);
//! ```

pub mod condition;
pub mod error;
pub mod field_map;
pub mod query;
pub mod set_clause;

pub use condition::{Condition, IDENTIFIER_ALIASES};
pub use error::{QueryError, Result};
pub use field_map::FieldMap;
pub use query::{assemble, build_patch_query};
pub use set_clause::{build_set_clause, quote_identifier, quote_literal, render_value};
