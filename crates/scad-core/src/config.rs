//! Runtime configuration
//!
//! Selects which natives are bound into the root scope and which variables
//! are predefined there. Loadable from RON:
//!
//! ```ron
//! (
//!     builtins: [echo],
//!     variables: { "$fn": 32.0 },
//! )
//! ```

use crate::runtime::Native;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid runtime config: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Natives bound into the root module namespace
    pub builtins: Vec<Native>,
    /// Numeric variables bound into the root scope
    pub variables: BTreeMap<String, f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            builtins: Native::ALL.to_vec(),
            variables: BTreeMap::new(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_binds_every_native() {
        let config = RuntimeConfig::default();
        assert_eq!(config.builtins, vec![Native::Echo, Native::Cube]);
        assert!(config.variables.is_empty());
    }

    #[test]
    fn test_from_ron() {
        let config = RuntimeConfig::from_ron(
            r#"(
                builtins: [echo],
                variables: { "$fn": 32.0, "size": 1.5 },
            )"#,
        )
        .unwrap();

        assert_eq!(config.builtins, vec![Native::Echo]);
        assert_eq!(config.variables.get("$fn"), Some(&32.0));
        assert_eq!(config.variables.get("size"), Some(&1.5));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = RuntimeConfig::from_ron("()").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_unknown_native_is_rejected() {
        let err = RuntimeConfig::from_ron("(builtins: [sphere])").unwrap_err();
        assert!(err.to_string().starts_with("invalid runtime config"));
    }
}
