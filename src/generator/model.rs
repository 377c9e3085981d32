//! Test generator model

use super::GeneratorResult;
use crate::rdf::{NamedNode, RdfSubject};
use crate::sparql::{DecomposedSelect, ParsedQuery, QueryTemplate, SparqlEngine};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Where a generator's query comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorQuery {
    /// Query text given on the generator itself
    Inline { text: String },
    /// Resolved stored template
    Template { template: QueryTemplate },
}

impl GeneratorQuery {
    /// Raw query text
    pub fn text(&self) -> &str {
        match self {
            GeneratorQuery::Inline { text } => text,
            GeneratorQuery::Template { template } => template.text(),
        }
    }

    /// The template, for template-backed queries
    pub fn template(&self) -> Option<&QueryTemplate> {
        match self {
            GeneratorQuery::Inline { .. } => None,
            GeneratorQuery::Template { template } => Some(template),
        }
    }
}

/// A validated test generator
///
/// Built once by [`GeneratorBuilder`](super::GeneratorBuilder) and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestGenerator {
    id: RdfSubject,
    query: GeneratorQuery,
    pattern_ids: IndexSet<NamedNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TestGenerator {
    pub(crate) fn new(
        id: RdfSubject,
        query: GeneratorQuery,
        pattern_ids: IndexSet<NamedNode>,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            query,
            pattern_ids,
            description,
        }
    }

    pub fn id(&self) -> &RdfSubject {
        &self.id
    }

    pub fn query(&self) -> &GeneratorQuery {
        &self.query
    }

    /// Patterns this generator is based on; order carries no meaning
    pub fn pattern_ids(&self) -> &IndexSet<NamedNode> {
        &self.pattern_ids
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Parse the generator query
    ///
    /// Template queries parse as their declared form with their own
    /// prefixes; inline text parses as whatever form it has.
    pub fn parse_query(&self, engine: &SparqlEngine) -> GeneratorResult<ParsedQuery> {
        let parsed = match &self.query {
            GeneratorQuery::Inline { text } => engine.parse_any_text(text)?,
            GeneratorQuery::Template { template } => engine.parse_template(template)?,
        };
        Ok(parsed)
    }

    /// Decompose the generator query, which must be a SELECT
    pub fn decompose(&self, engine: &SparqlEngine) -> GeneratorResult<DecomposedSelect> {
        Ok(self.parse_query(engine)?.into_select()?.decompose()?)
    }
}
