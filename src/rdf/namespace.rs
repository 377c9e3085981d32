//! RDF namespace and prefix management
//!
//! This module handles namespace prefixes for compact IRI notation and the
//! standard prefix set prepended to every template query.

use std::collections::BTreeMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Prefixes every template query can rely on without declaring them
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("sh", "http://www.w3.org/ns/shacl#"),
    ("sp", "http://spinrdf.org/sp#"),
    ("spin", "http://spinrdf.org/spin#"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
];

/// Namespace manager
///
/// Prefixes are kept sorted by name so that rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings
    prefixes: BTreeMap<String, String>,
}

impl NamespaceManager {
    /// Create an empty namespace manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namespace manager holding the standard prefixes
    pub fn standard() -> Self {
        let mut mgr = Self::new();
        for (prefix, iri) in STANDARD_PREFIXES {
            mgr.add_prefix(*prefix, *iri);
        }
        mgr
    }

    /// Add a prefix, replacing any previous binding of the same name
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Overlay `other` on top of this manager; `other` wins on name collision
    pub fn merged_with<'a, I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut merged = self.clone();
        for (prefix, iri) in other {
            merged.add_prefix(prefix.clone(), iri.clone());
        }
        merged
    }

    /// Render `PREFIX p: <iri>` declarations, one per line
    pub fn render_declarations(&self) -> String {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| format!("PREFIX {}: <{}>\n", prefix, iri))
            .collect()
    }

    /// Number of registered prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// True if no prefix is registered
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterate over (prefix, iri) pairs in prefix order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.prefixes.iter()
    }
}

impl FromIterator<(String, String)> for NamespaceManager {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            prefixes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefixes() {
        let mgr = NamespaceManager::standard();

        assert_eq!(
            mgr.get_iri("rdf").unwrap(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        );
        assert_eq!(
            mgr.get_iri("rdfs").unwrap(),
            "http://www.w3.org/2000/01/rdf-schema#"
        );
        assert_eq!(mgr.get_iri("xsd").unwrap(), "http://www.w3.org/2001/XMLSchema#");
        assert!(mgr.get_iri("ex").is_err());
    }

    #[test]
    fn test_merged_overrides_on_collision() {
        let base = NamespaceManager::standard();
        let mut own = BTreeMap::new();
        own.insert("foaf".to_string(), "http://example.org/my-foaf#".to_string());
        own.insert("ex".to_string(), "http://example.org/".to_string());

        let merged = base.merged_with(&own);
        assert_eq!(merged.get_iri("foaf").unwrap(), "http://example.org/my-foaf#");
        assert_eq!(merged.get_iri("ex").unwrap(), "http://example.org/");
        assert_eq!(merged.len(), base.len() + 1);
        // the base manager is untouched
        assert_eq!(base.get_iri("foaf").unwrap(), "http://xmlns.com/foaf/0.1/");
    }

    #[test]
    fn test_render_is_sorted() {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("z", "http://example.org/z#");
        mgr.add_prefix("a", "http://example.org/a#");

        assert_eq!(
            mgr.render_declarations(),
            "PREFIX a: <http://example.org/a#>\nPREFIX z: <http://example.org/z#>\n"
        );
    }
}
