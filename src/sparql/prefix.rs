//! Prefix binding
//!
//! Produces the text handed to the parser: the merged `PREFIX` declarations
//! followed by the raw query text.

use crate::rdf::NamespaceManager;
use std::collections::BTreeMap;

/// Merges a query's own prefixes with the standard set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixBinder {
    standard: NamespaceManager,
}

impl PrefixBinder {
    /// Create a binder over the given standard prefixes
    pub fn new(standard: NamespaceManager) -> Self {
        Self { standard }
    }

    /// The standard prefixes
    pub fn standard(&self) -> &NamespaceManager {
        &self.standard
    }

    /// Standard prefixes overlaid with `prefixes`; the query's own win
    pub fn merged(&self, prefixes: &BTreeMap<String, String>) -> NamespaceManager {
        self.standard.merged_with(prefixes)
    }

    /// Effective query text: rendered declarations followed by `raw_text`
    pub fn bind(&self, prefixes: &BTreeMap<String, String>, raw_text: &str) -> String {
        let mut text = self.merged(prefixes).render_declarations();
        text.push_str(raw_text);
        text
    }
}

impl Default for PrefixBinder {
    fn default() -> Self {
        Self::new(NamespaceManager::standard())
    }
}
