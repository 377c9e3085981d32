//! Template reference resolution
//!
//! Expands `qt:queryTemplate` references in a description graph by splicing
//! in the referenced template descriptions from a catalog. Resolution goes
//! one level deep: references made by spliced templates are not followed.

use super::catalog::TemplateCatalog;
use super::definition::is_defined;
use super::{TemplateError, TemplateResult};
use crate::rdf::vocab::{self, qt};
use crate::rdf::{DescriptionGraph, NamedNode, RdfObject};
use indexmap::IndexSet;
use tracing::debug;

/// Resolves template references against an injected catalog
pub struct TemplateReferenceResolver<'a> {
    catalog: &'a dyn TemplateCatalog,
}

impl<'a> TemplateReferenceResolver<'a> {
    pub fn new(catalog: &'a dyn TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Distinct referenced template ids, in first-seen order
    pub fn references(graph: &DescriptionGraph) -> TemplateResult<IndexSet<NamedNode>> {
        let predicate = vocab::term(qt::QUERY_TEMPLATE);
        let mut ids = IndexSet::new();
        for triple in graph.iter().filter(|t| t.predicate.as_named_node() == &predicate) {
            match &triple.object {
                RdfObject::NamedNode(id) => {
                    ids.insert(id.clone());
                }
                other => {
                    return Err(TemplateError::InvalidTemplateReference {
                        subject: triple.subject.clone(),
                        value: other.clone(),
                    })
                }
            }
        }
        Ok(ids)
    }

    /// Return `graph` with every referenced template description spliced in
    ///
    /// Each referenced id is looked up once. A template defined both in
    /// `graph` and in the catalog is rejected rather than merged; a template
    /// defined only in `graph` is used as is. The input is left untouched.
    pub fn resolve(&self, graph: &DescriptionGraph) -> TemplateResult<DescriptionGraph> {
        let mut resolved = graph.clone();

        for id in Self::references(graph)? {
            let local = is_defined(graph, &id);
            match (local, self.catalog.lookup(&id)?) {
                (true, Some(_)) => return Err(TemplateError::DuplicateTemplateDefinition(id)),
                (true, None) => {
                    debug!("Template {} is defined inline", id);
                }
                (false, Some(description)) => {
                    if !is_defined(&description, &id) {
                        return Err(TemplateError::InvalidTemplate {
                            id,
                            reason: "catalog description does not define the template".to_string(),
                        });
                    }
                    debug!("Splicing template {} ({} triples)", id, description.len());
                    resolved.merge(&description);
                }
                (false, None) => return Err(TemplateError::UnresolvedTemplateReference(id)),
            }
        }

        Ok(resolved)
    }
}
