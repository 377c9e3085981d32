//! Generator construction from description graphs

use super::model::{GeneratorQuery, TestGenerator};
use super::{GeneratorError, GeneratorResult};
use crate::rdf::vocab::{self, qt, rdf, rdfs};
use crate::rdf::{DescriptionGraph, RdfObject, RdfSubject};
use crate::templates::{read_template, TemplateCatalog, TemplateReferenceResolver};
use indexmap::IndexSet;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds test generators, resolving template references against a catalog
#[derive(Clone)]
pub struct GeneratorBuilder {
    catalog: Arc<dyn TemplateCatalog>,
}

impl GeneratorBuilder {
    pub fn new(catalog: Arc<dyn TemplateCatalog>) -> Self {
        Self { catalog }
    }

    /// Subjects typed `qt:TestGenerator`, in insertion order
    pub fn generator_ids(graph: &DescriptionGraph) -> Vec<RdfSubject> {
        graph.subjects_of_type(&vocab::term(qt::TEST_GENERATOR))
    }

    /// Build the generator described by `id` in `graph`
    pub fn build(&self, id: &RdfSubject, graph: &DescriptionGraph) -> GeneratorResult<TestGenerator> {
        if !graph.has(
            id,
            &vocab::term(rdf::TYPE),
            &RdfObject::NamedNode(vocab::term(qt::TEST_GENERATOR)),
        ) {
            return Err(GeneratorError::TypeMismatch(id.clone()));
        }

        let description = graph.extract_subtree(id);
        let resolved = TemplateReferenceResolver::new(self.catalog.as_ref()).resolve(&description)?;

        let query = read_query_source(id, &resolved)?;

        let mut pattern_ids = IndexSet::new();
        for object in resolved.objects(id, &vocab::term(qt::BASED_ON_PATTERN)) {
            let pattern = object.as_named_node().ok_or_else(|| GeneratorError::InvalidPropertyValue {
                id: id.clone(),
                property: qt::BASED_ON_PATTERN,
                expected: "an IRI",
            })?;
            pattern_ids.insert(pattern.clone());
        }

        let description = resolved
            .objects(id, &vocab::term(rdfs::COMMENT))
            .into_iter()
            .find_map(|object| object.as_literal())
            .map(|literal| literal.value().to_string());

        debug!("Built generator {} ({} patterns)", id, pattern_ids.len());
        Ok(TestGenerator::new(id.clone(), query, pattern_ids, description))
    }

    /// Build every generator in `graph`, stopping at the first failure
    pub fn build_all(&self, graph: &DescriptionGraph) -> GeneratorResult<Vec<TestGenerator>> {
        let ids = Self::generator_ids(graph);
        info!("Building {} generators", ids.len());
        ids.iter().map(|id| self.build(id, graph)).collect()
    }

    /// Build the generators of several independent graphs in parallel
    ///
    /// Output follows input order. Any failure fails the whole batch; which
    /// failure is reported when several graphs fail is not specified.
    pub fn build_all_parallel(&self, graphs: &[DescriptionGraph]) -> GeneratorResult<Vec<TestGenerator>> {
        let batches = graphs
            .par_iter()
            .map(|graph| self.build_all(graph))
            .collect::<GeneratorResult<Vec<_>>>()?;
        Ok(batches.into_iter().flatten().collect())
    }
}

/// Exactly one of an inline query or a template reference
fn read_query_source(id: &RdfSubject, graph: &DescriptionGraph) -> GeneratorResult<GeneratorQuery> {
    let inline = graph.objects(id, &vocab::term(qt::GENERATOR_QUERY));
    let templates = graph.objects(id, &vocab::term(qt::QUERY_TEMPLATE));

    match (inline.as_slice(), templates.as_slice()) {
        ([], []) => Err(GeneratorError::MissingQuerySource(id.clone())),
        ([text], []) => {
            let text = text.as_literal().ok_or_else(|| GeneratorError::InvalidPropertyValue {
                id: id.clone(),
                property: qt::GENERATOR_QUERY,
                expected: "a literal",
            })?;
            Ok(GeneratorQuery::Inline {
                text: text.value().to_string(),
            })
        }
        ([], [template]) => {
            let template_id = template.as_named_node().ok_or_else(|| GeneratorError::InvalidPropertyValue {
                id: id.clone(),
                property: qt::QUERY_TEMPLATE,
                expected: "an IRI",
            })?;
            Ok(GeneratorQuery::Template {
                template: read_template(graph, template_id)?,
            })
        }
        _ => Err(GeneratorError::AmbiguousQuerySource(id.clone())),
    }
}
