use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, ContractResult};

/// What to do when a second reconciliation arrives for a charge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationPolicy {
    /// One reconciliation per charge; later ones are duplicates.
    #[default]
    Strict,
    /// A later reconciliation replaces the stored one if its
    /// `resubmitCount` is higher.
    Supersede,
}

impl fmt::Display for ReconciliationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Supersede => f.write_str("supersede"),
        }
    }
}

/// Tunables for the operation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub reconciliation_policy: ReconciliationPolicy,
    /// Require referenced agencies to be registered before a tag, charge or
    /// settlement naming them is created.
    pub verify_references: bool,
    /// Maximum records returned by one query.
    pub query_limit: usize,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            reconciliation_policy: ReconciliationPolicy::Strict,
            verify_references: true,
            query_limit: 1000,
        }
    }
}

impl ContractConfig {
    pub fn from_toml_str(raw: &str) -> ContractResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ContractError::Config(e.to_string()))?;
        if config.query_limit == 0 {
            return Err(ContractError::Config(
                "query_limit must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> ContractResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| ContractError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ContractConfig::default();
        assert_eq!(config.reconciliation_policy, ReconciliationPolicy::Strict);
        assert!(config.verify_references);
        assert_eq!(config.query_limit, 1000);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = ContractConfig::from_toml_str("reconciliation_policy = \"supersede\"").unwrap();
        assert_eq!(config.reconciliation_policy, ReconciliationPolicy::Supersede);
        assert!(config.verify_references);
    }

    #[test]
    fn bad_values_rejected() {
        assert!(matches!(
            ContractConfig::from_toml_str("reconciliation_policy = \"lenient\""),
            Err(ContractError::Config(_))
        ));
        assert!(ContractConfig::from_toml_str("query_limit = 0").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tollx.toml");
        assert_eq!(ContractConfig::load(&path).unwrap(), ContractConfig::default());

        fs::write(&path, "verify_references = false\nquery_limit = 10\n").unwrap();
        let config = ContractConfig::load(&path).unwrap();
        assert!(!config.verify_references);
        assert_eq!(config.query_limit, 10);
    }
}
