use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Field names recognized as an identifier condition when parsing.
pub const IDENTIFIER_ALIASES: [&str; 3] = ["id", "Id", "ID"];

/// The condition that restricts a patch query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    /// Match rows whose identifier column equals the original document's
    /// value for this field.
    Identifier(String),
    /// A caller-supplied fragment appended verbatim after the SET clause,
    /// for example `WHERE email = 'a@b.c'`.
    Clause(String),
}

impl Condition {
    /// Interpret a condition specification.
    ///
    /// An empty (or all-whitespace) specification fails with
    /// [`QueryError::NoCondition`]; one of [`IDENTIFIER_ALIASES`] becomes an
    /// identifier condition; anything else is a verbatim clause.
    pub fn parse(spec: &str) -> Result<Self, QueryError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(QueryError::NoCondition);
        }
        if IDENTIFIER_ALIASES.contains(&trimmed) {
            return Ok(Self::Identifier(trimmed.to_string()));
        }
        Ok(Self::Clause(spec.to_string()))
    }

    /// Identifier condition on an arbitrary field.
    pub fn identifier(field: impl Into<String>) -> Self {
        Self::Identifier(field.into())
    }

    pub fn clause(clause: impl Into<String>) -> Self {
        Self::Clause(clause.into())
    }

    /// Returns `true` if the condition would not restrict anything.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Identifier(s) | Self::Clause(s) => s.trim().is_empty(),
        }
    }
}

impl FromStr for Condition {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(field) => write!(f, "identifier '{field}'"),
            Self::Clause(clause) => f.write_str(clause),
        }
    }
}
