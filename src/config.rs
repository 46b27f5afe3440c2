//! Record defaults, optionally overridden from environment variables.
use crate::algorithm::HashAlgorithm;
use crate::error::{NodeError, Result};

pub const ALGORITHM_VAR: &str = "HASHNODE_ALGORITHM";
pub const DEFAULT_KEY_VAR: &str = "HASHNODE_DEFAULT_KEY";
pub const DEFAULT_KEY: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordConfig {
    /// Algorithm new records start with.
    pub algorithm: HashAlgorithm,
    /// Key used by `add_data`.
    pub default_key: String,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            default_key: DEFAULT_KEY.to_string(),
        }
    }
}

impl RecordConfig {
    /// Reads `HASHNODE_ALGORITHM` and `HASHNODE_DEFAULT_KEY` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(tag) = lookup(ALGORITHM_VAR) {
            config.algorithm = tag.parse()?;
        }
        if let Some(key) = lookup(DEFAULT_KEY_VAR) {
            if key.is_empty() {
                return Err(NodeError::Config(format!("{DEFAULT_KEY_VAR} is empty")));
            }
            config.default_key = key;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RecordConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RecordConfig::default());
        assert_eq!(config.default_key, "data");
        assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_overrides() {
        let config = RecordConfig::from_lookup(lookup_from(&[
            (ALGORITHM_VAR, "sha3-256"),
            (DEFAULT_KEY_VAR, "payload"),
        ]))
        .unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Sha3_256);
        assert_eq!(config.default_key, "payload");
    }

    #[test]
    fn test_bad_algorithm() {
        let err = RecordConfig::from_lookup(lookup_from(&[(ALGORITHM_VAR, "crc32")])).unwrap_err();
        assert!(matches!(err, NodeError::InvalidAlgorithm(_)));
    }

    #[test]
    fn test_empty_key() {
        let err = RecordConfig::from_lookup(lookup_from(&[(DEFAULT_KEY_VAR, "")])).unwrap_err();
        assert!(matches!(err, NodeError::Config(_)));
    }
}
