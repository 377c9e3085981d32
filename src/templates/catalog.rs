//! Template catalogs
//!
//! A catalog maps a template id to the RDF description of that template.
//! Lookups are read-only, so one catalog can serve concurrent builds.

use super::definition::{is_defined, write_template};
use super::TemplateResult;
use crate::rdf::{DescriptionGraph, NamedNode, ParseError, ParseResult, RdfFormat, RdfParser, RdfSubject};
use crate::sparql::QueryTemplate;
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup of stored query templates
pub trait TemplateCatalog: Send + Sync {
    /// Description of template `id`, or `None` if the catalog lacks it
    fn lookup(&self, id: &NamedNode) -> TemplateResult<Option<DescriptionGraph>>;
}

/// Catalog held in a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    templates: HashMap<NamedNode, DescriptionGraph>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a description under `id`, replacing any previous one
    pub fn insert(&mut self, id: NamedNode, description: DescriptionGraph) {
        self.templates.insert(id, description);
    }

    /// Store the SPIN description of `template`
    pub fn insert_template(&mut self, template: &QueryTemplate) {
        self.insert(template.id().clone(), write_template(template));
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateCatalog for InMemoryCatalog {
    fn lookup(&self, id: &NamedNode) -> TemplateResult<Option<DescriptionGraph>> {
        Ok(self.templates.get(id).cloned())
    }
}

/// Catalog backed by one graph holding many template descriptions
#[derive(Debug, Clone, Default)]
pub struct GraphCatalog {
    graph: DescriptionGraph,
}

impl GraphCatalog {
    pub fn new(graph: DescriptionGraph) -> Self {
        Self { graph }
    }

    /// Load template descriptions from Turtle
    pub fn from_turtle(input: &str) -> ParseResult<Self> {
        RdfParser::parse(input, RdfFormat::Turtle).map(Self::new)
    }

    /// Load template descriptions from a `.ttl` or `.nt` file
    pub fn from_file(path: &Path) -> ParseResult<Self> {
        let format = RdfFormat::from_extension(path)
            .ok_or_else(|| ParseError::Parse(format!("Unknown RDF file extension: {}", path.display())))?;
        RdfParser::parse_file(path, format).map(Self::new)
    }

    pub fn graph(&self) -> &DescriptionGraph {
        &self.graph
    }
}

impl TemplateCatalog for GraphCatalog {
    fn lookup(&self, id: &NamedNode) -> TemplateResult<Option<DescriptionGraph>> {
        if !is_defined(&self.graph, id) {
            return Ok(None);
        }
        Ok(Some(self.graph.extract_subtree(&RdfSubject::NamedNode(id.clone()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::QueryForm;
    use crate::templates::read_template;

    fn template(name: &str, text: &str) -> QueryTemplate {
        let id = NamedNode::new(&format!("http://example.org/templates/{}", name)).unwrap();
        QueryTemplate::new(id, QueryForm::Select, text)
    }

    #[test]
    fn test_in_memory_lookup() {
        let mut catalog = InMemoryCatalog::new();
        let t = template("all", "SELECT * WHERE { ?s ?p ?o }");
        catalog.insert_template(&t);
        assert_eq!(catalog.len(), 1);

        let description = catalog.lookup(t.id()).unwrap().unwrap();
        assert_eq!(read_template(&description, t.id()).unwrap(), t);

        let missing = NamedNode::new("http://example.org/templates/missing").unwrap();
        assert!(catalog.lookup(&missing).unwrap().is_none());
    }

    #[test]
    fn test_graph_catalog_extracts_one_template() {
        let mut graph = DescriptionGraph::new();
        let first = template("first", "SELECT ?a WHERE { ?a ?p ?o }");
        let second = template("second", "SELECT ?b WHERE { ?s ?p ?b }");
        graph.merge(&write_template(&first));
        graph.merge(&write_template(&second));

        let catalog = GraphCatalog::new(graph);
        let description = catalog.lookup(first.id()).unwrap().unwrap();

        assert_eq!(read_template(&description, first.id()).unwrap(), first);
        assert!(!is_defined(&description, second.id()));
    }

    #[test]
    fn test_graph_catalog_from_turtle() {
        let catalog = GraphCatalog::from_turtle(
            r#"
            @prefix spin: <http://spinrdf.org/spin#> .
            @prefix sp: <http://spinrdf.org/sp#> .
            <http://example.org/templates/ask> a spin:Template ;
                spin:body [ a sp:Ask ; sp:text "ASK {}" ] .
            "#,
        )
        .unwrap();

        let id = NamedNode::new("http://example.org/templates/ask").unwrap();
        let description = catalog.lookup(&id).unwrap().unwrap();
        assert_eq!(read_template(&description, &id).unwrap().form(), QueryForm::Ask);
    }
}
