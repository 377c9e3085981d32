//! Template configuration
//!
//! Loaded from YAML:
//!
//! ```yaml
//! base_iri: "http://example.org/templates/"
//! standard_prefixes:
//!   rdfs: "http://www.w3.org/2000/01/rdf-schema#"
//!   ex: "http://example.org/"
//! ```
//!
//! Missing keys fall back to [`TemplateConfig::default`].

use crate::rdf::{NamespaceManager, STANDARD_PREFIXES};
use oxiri::Iri;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Base IRI for relative references in query text
pub const DEFAULT_BASE_IRI: &str = "http://localhost/templates/";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A configured IRI is not absolute
    #[error("Invalid IRI for {field} ({value}): {message}")]
    InvalidIri {
        field: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parsing configuration shared by all templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Base IRI handed to the parser
    pub base_iri: String,
    /// Prefixes bound in front of every query
    pub standard_prefixes: BTreeMap<String, String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            base_iri: DEFAULT_BASE_IRI.to_string(),
            standard_prefixes: STANDARD_PREFIXES
                .iter()
                .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
                .collect(),
        }
    }
}

impl TemplateConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check that the base IRI and every prefix namespace are absolute IRIs
    pub fn validate(&self) -> ConfigResult<()> {
        check_iri("base_iri", &self.base_iri)?;
        for (prefix, iri) in &self.standard_prefixes {
            check_iri(&format!("standard_prefixes.{}", prefix), iri)?;
        }
        Ok(())
    }

    /// The standard prefixes as a namespace manager
    pub fn namespace_manager(&self) -> NamespaceManager {
        self.standard_prefixes
            .iter()
            .map(|(prefix, iri)| (prefix.clone(), iri.clone()))
            .collect()
    }
}

fn check_iri(field: &str, value: &str) -> ConfigResult<()> {
    Iri::parse(value).map_err(|e| ConfigError::InvalidIri {
        field: field.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = TemplateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_iri, DEFAULT_BASE_IRI);
        assert_eq!(config.namespace_manager().len(), STANDARD_PREFIXES.len());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = TemplateConfig::from_yaml_str("base_iri: \"http://example.org/base/\"\n").unwrap();
        assert_eq!(config.base_iri, "http://example.org/base/");
        assert!(config.standard_prefixes.contains_key("rdfs"));
    }

    #[test]
    fn test_yaml_prefixes_replace_standard_set() {
        let yaml = "standard_prefixes:\n  ex: \"http://example.org/\"\n";
        let config = TemplateConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.standard_prefixes.len(), 1);
        assert_eq!(config.namespace_manager().get_iri("ex").unwrap(), "http://example.org/");
    }

    #[test]
    fn test_relative_base_iri_rejected() {
        let err = TemplateConfig::from_yaml_str("base_iri: \"templates/\"\n").unwrap_err();
        match err {
            ConfigError::InvalidIri { field, value, .. } => {
                assert_eq!(field, "base_iri");
                assert_eq!(value, "templates/");
            }
            other => panic!("Expected InvalidIri, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_prefix_iri_rejected() {
        let yaml = "standard_prefixes:\n  bad: \"not an iri\"\n";
        let err = TemplateConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIri { ref field, .. } if field == "standard_prefixes.bad"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = TemplateConfig::from_yaml_str("base_iri: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_iri: \"http://example.org/from-file/\"").unwrap();

        let config = TemplateConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_iri, "http://example.org/from-file/");
    }

    #[test]
    fn test_missing_file() {
        let err = TemplateConfig::from_file("/nonexistent/templates.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
