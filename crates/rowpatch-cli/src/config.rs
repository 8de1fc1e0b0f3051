use std::fs;
use std::path::Path;

use anyhow::Context;
use rowpatch_sql::FieldMap;
use rowpatch_types::DiffOptions;
use serde::Deserialize;

/// Defaults loaded from the `--config` file. Flags override every value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub diff: DiffOptions,
    pub query: QueryConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub table: Option<String>,
    pub condition: Option<String>,
    pub field_map: FieldMap,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_optional(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowpatch_types::{ReconciliationPolicy, DEFAULT_MAX_DEPTH};
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = Config::load_optional(None).unwrap();
        assert_eq!(config.diff, DiffOptions::default());
        assert!(config.query.table.is_none());
        assert!(config.query.field_map.is_empty());
    }

    #[test]
    fn load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[diff]
policy = "replace"
max_depth = 32

[query]
table = "users"
condition = "id"

[query.field_map]
last_name = "lastName"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.diff.policy, ReconciliationPolicy::Replace);
        assert_eq!(config.diff.max_depth, 32);
        assert_eq!(config.query.table.as_deref(), Some("users"));
        assert_eq!(config.query.condition.as_deref(), Some("id"));
        assert_eq!(config.query.field_map.column_for("last_name"), "lastName");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[diff]\npolicy = \"union\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.diff.policy, ReconciliationPolicy::Union);
        assert_eq!(config.diff.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.query.condition.is_none());
    }

    #[test]
    fn invalid_policy_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[diff]\npolicy = \"append\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("parsing config file"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().starts_with("reading config file"));
    }
}
