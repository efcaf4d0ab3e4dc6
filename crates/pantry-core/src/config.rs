//! Deployment configuration.
//!
//! Loaded from a TOML file; the server binary layers CLI flags and
//! environment variables on top.
//!
//! ```toml
//! bind = "127.0.0.1:8787"
//! basket_ttl_seconds = 3600
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [[pantry]]
//! id = "TEST_PANTRY_ID"
//! namespace = "test"
//! ```

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BasketTtl, PantryId};

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid pantry binding '{0}': expected ID or ID=NAMESPACE")]
    InvalidBinding(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP listen address.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// TTL for basket writes and read refreshes; non-positive disables it.
    #[serde(default)]
    pub basket_ttl_seconds: BasketTtl,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Provisioned pantries (pantry id -> namespace).
    #[serde(default, rename = "pantry")]
    pub pantries: Vec<PantryBinding>,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            basket_ttl_seconds: BasketTtl::default(),
            logging: LoggingConfig::default(),
            pantries: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Pantry ids must be non-empty, unique and a single path segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for binding in &self.pantries {
            let id = binding.id.as_str();
            if id.is_empty() {
                return Err(ConfigError::Invalid("pantry id must not be empty".into()));
            }
            if id.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "pantry id '{id}' must not contain '/'"
                )));
            }
            if binding.namespace().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "pantry '{id}' has an empty namespace"
                )));
            }
            if !seen.insert(id) {
                return Err(ConfigError::Invalid(format!("duplicate pantry id '{id}'")));
            }
        }
        Ok(())
    }
}

/// Maps an externally visible pantry id onto a store namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PantryBinding {
    pub id: PantryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl PantryBinding {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PantryId::new(id),
            namespace: None,
        }
    }

    /// Namespace name, defaulting to the pantry id.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(self.id.as_str())
    }

    /// Parse the `ID[=NAMESPACE]` command-line form.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let (id, namespace) = match raw.split_once('=') {
            Some((id, namespace)) => (id.trim(), Some(namespace.trim())),
            None => (raw.trim(), None),
        };
        if id.is_empty() || namespace.is_some_and(str::is_empty) {
            return Err(ConfigError::InvalidBinding(raw.to_string()));
        }
        Ok(Self {
            id: PantryId::new(id),
            namespace: namespace.map(str::to_owned),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert!(!config.basket_ttl_seconds.is_enabled());
    }

    #[test]
    fn full_file_parses() {
        let config = Config::from_toml_str(
            r#"
            bind = "0.0.0.0:9000"
            basket_ttl_seconds = "3600"

            [logging]
            level = "debug"
            format = "json"

            [[pantry]]
            id = "TEST_PANTRY_ID"
            namespace = "test"

            [[pantry]]
            id = "other"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.basket_ttl_seconds.seconds(), Some(3600));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.pantries.len(), 2);
        assert_eq!(config.pantries[0].namespace(), "test");
        assert_eq!(config.pantries[1].namespace(), "other");
    }

    #[test]
    fn duplicate_pantry_ids_are_rejected() {
        let err = Config::from_toml_str(
            r#"
            [[pantry]]
            id = "a"
            [[pantry]]
            id = "a"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("percent_full = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[rstest]
    #[case::bare("p1", "p1", "p1")]
    #[case::with_namespace("p1=ns", "p1", "ns")]
    #[case::trimmed(" p1 = ns ", "p1", "ns")]
    fn binding_flag_parses(#[case] raw: &str, #[case] id: &str, #[case] namespace: &str) {
        let binding = PantryBinding::parse(raw).unwrap();
        assert_eq!(binding.id.as_str(), id);
        assert_eq!(binding.namespace(), namespace);
    }

    #[rstest]
    #[case::empty("")]
    #[case::empty_id("=ns")]
    #[case::empty_namespace("p1=")]
    fn binding_flag_rejects(#[case] raw: &str) {
        assert!(matches!(
            PantryBinding::parse(raw),
            Err(ConfigError::InvalidBinding(_))
        ));
    }

    #[test]
    fn slash_in_pantry_id_is_rejected() {
        let config = Config {
            pantries: vec![PantryBinding::new("a/b")],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
