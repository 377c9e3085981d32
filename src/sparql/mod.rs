//! SPARQL query templates
//!
//! This module turns stored query templates into typed parsed queries and
//! decomposes SELECT algebra back into its clauses.
//!
//! - [`PrefixBinder`] renders a template's prefixes in front of its text
//! - [`QueryParser`] parses that text as a requested [`QueryForm`]
//! - [`AlgebraDecomposer`] rebuilds SELECT clause slots from the algebra
//! - [`SparqlEngine`] bundles binder and parser for configured use
//!
//! # Example
//!
//! ```rust
//! use sparql_templates::rdf::NamedNode;
//! use sparql_templates::sparql::{QueryForm, QueryTemplate, SparqlEngine};
//!
//! let template = QueryTemplate::new(
//!     NamedNode::new("http://example.org/templates/names").unwrap(),
//!     QueryForm::Select,
//!     "SELECT ?name ?s WHERE { ?s foaf:name ?name }",
//! );
//!
//! let engine = SparqlEngine::default();
//! let select = engine.decompose_template(&template).unwrap();
//! assert_eq!(select.projection_result_vars(), vec!["name", "s"]);
//! ```

mod decompose;
mod form;
mod parsed;
mod parser;
mod prefix;
mod query;

pub use decompose::{
    AlgebraDecomposer, ClauseKind, DecomposedSelect, GroupClause, ProjectionElement, QueryModifier,
    ValuesClause,
};
pub use form::QueryForm;
pub use parsed::{BooleanQuery, DescribeQuery, GraphQuery, ParsedQuery, QueryShape, TupleQuery};
pub use parser::QueryParser;
pub use prefix::PrefixBinder;
pub use query::QueryTemplate;

use crate::config::TemplateConfig;
use thiserror::Error;
use tracing::debug;

/// SPARQL errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SparqlError {
    /// The parser rejected the text
    #[error("Malformed query: {message}")]
    MalformedQuery { message: String, text: String },

    /// The text parsed, but as another form than requested
    #[error("Query form mismatch: expected {expected}, found {actual}")]
    QueryFormMismatch { expected: QueryForm, actual: QueryForm },

    /// Decomposition found no projection node
    #[error("Not a projection query: algebra root is {0}")]
    NotAProjectionQuery(String),
}

pub type SparqlResult<T> = Result<T, SparqlError>;

/// Parses query templates with a fixed prefix set and base IRI
#[derive(Debug, Clone, Default)]
pub struct SparqlEngine {
    binder: PrefixBinder,
    parser: QueryParser,
}

impl SparqlEngine {
    /// Create an engine from its parts
    pub fn new(binder: PrefixBinder, parser: QueryParser) -> Self {
        Self { binder, parser }
    }

    /// Create an engine from configuration
    pub fn from_config(config: &TemplateConfig) -> Self {
        Self::new(
            PrefixBinder::new(config.namespace_manager()),
            QueryParser::new(config.base_iri.clone()),
        )
    }

    pub fn binder(&self) -> &PrefixBinder {
        &self.binder
    }

    pub fn parser(&self) -> &QueryParser {
        &self.parser
    }

    /// Parse a template as its declared form
    ///
    /// Parsing happens on every call; nothing is cached on the template.
    pub fn parse_template(&self, template: &QueryTemplate) -> SparqlResult<ParsedQuery> {
        debug!("Parsing template {} as {}", template.id(), template.form());
        self.parse_text(&template.effective_text(&self.binder), template.form())
    }

    /// Parse a template as the form `T` stands for, ignoring its declared form
    pub fn parse_template_as<T: QueryShape>(&self, template: &QueryTemplate) -> SparqlResult<T> {
        self.parser.parse_as(&template.effective_text(&self.binder))
    }

    /// Parse a template as SELECT and decompose it
    pub fn decompose_template(&self, template: &QueryTemplate) -> SparqlResult<DecomposedSelect> {
        self.parse_template_as::<TupleQuery>(template)?.decompose()
    }

    /// Parse already prefixed text as `form`
    pub fn parse_text(&self, text: &str, form: QueryForm) -> SparqlResult<ParsedQuery> {
        self.parser.parse(text, form)
    }

    /// Parse raw text with the standard prefixes bound, whatever its form
    pub fn parse_any_text(&self, raw_text: &str) -> SparqlResult<ParsedQuery> {
        let text = self.binder.bind(&Default::default(), raw_text);
        self.parser.parse_any(&text)
    }
}
