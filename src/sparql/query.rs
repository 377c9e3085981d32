//! Stored query templates

use super::form::QueryForm;
use super::prefix::PrefixBinder;
use crate::rdf::NamedNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored query: raw text plus its own prefix bindings
///
/// The parsed algebra is not kept. Every parse goes through
/// [`SparqlEngine`](super::SparqlEngine) so that malformed text surfaces
/// where the query is used, not where it is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemplate {
    id: NamedNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    form: QueryForm,
    text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    prefixes: BTreeMap<String, String>,
}

impl QueryTemplate {
    /// Create a template without label, description or prefixes
    pub fn new(id: NamedNode, form: QueryForm, text: impl Into<String>) -> Self {
        Self {
            id,
            label: None,
            description: None,
            form,
            text: text.into(),
            prefixes: BTreeMap::new(),
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a prefix; a later declaration of the same name replaces it
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), namespace.into());
        self
    }

    pub fn id(&self) -> &NamedNode {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn form(&self) -> QueryForm {
        self.form
    }

    /// Raw query text, without prefix declarations
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    /// Text handed to the parser
    pub fn effective_text(&self, binder: &PrefixBinder) -> String {
        binder.bind(&self.prefixes, &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> QueryTemplate {
        QueryTemplate::new(
            NamedNode::new("http://example.org/templates/labels").unwrap(),
            QueryForm::Select,
            "SELECT ?s ?label WHERE { ?s ex:name ?label }",
        )
        .with_label("Labels")
        .with_prefix("ex", "http://example.org/")
    }

    #[test]
    fn test_effective_text_includes_own_prefixes() {
        let text = template().effective_text(&PrefixBinder::default());
        assert!(text.contains("PREFIX ex: <http://example.org/>\n"));
        assert!(text.ends_with("SELECT ?s ?label WHERE { ?s ex:name ?label }"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let template = template();
        let json = serde_json::to_string(&template).unwrap();
        assert!(json.contains("\"form\":\"SELECT\""));
        assert!(!json.contains("description"));

        let back: QueryTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }
}
