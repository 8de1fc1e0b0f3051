use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Default nesting limit for structural recursion.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How two divergent arrays are combined into one.
///
/// Exactly one policy is active per top-level diff; it is never overridden
/// for an individual field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationPolicy {
    /// Keep the original elements and append the elements of the new array
    /// that the original does not already contain.
    #[default]
    Merge,
    /// The new array wholly replaces the original.
    Replace,
    /// Append the full new array after the original, duplicates included.
    Union,
}

impl ReconciliationPolicy {
    pub const ALL: [ReconciliationPolicy; 3] = [Self::Merge, Self::Replace, Self::Union];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
            Self::Union => "union",
        }
    }
}

impl fmt::Display for ReconciliationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconciliationPolicy {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            "union" => Ok(Self::Union),
            _ => Err(TypeError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Configuration for a single diff invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Policy applied to every divergent array in the document.
    pub policy: ReconciliationPolicy,
    /// Maximum structural recursion depth. The top-level comparison is
    /// depth 0; each recursion into a divergent array element adds one.
    pub max_depth: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            policy: ReconciliationPolicy::Merge,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a sequence of policy selectors.
    ///
    /// Selectors are applied in order, so the last one wins. An empty
    /// sequence yields the default `Merge` policy.
    pub fn from_policies<I>(selectors: I) -> Self
    where
        I: IntoIterator<Item = ReconciliationPolicy>,
    {
        selectors
            .into_iter()
            .fold(Self::default(), |opts, policy| opts.with_policy(policy))
    }

    pub fn with_policy(mut self, policy: ReconciliationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
