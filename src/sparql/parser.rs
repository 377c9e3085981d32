//! SPARQL parser using spargebra library

use super::form::QueryForm;
use super::parsed::{BooleanQuery, DescribeQuery, GraphQuery, ParsedQuery, QueryShape, TupleQuery};
use super::{SparqlError, SparqlResult};
use crate::config::DEFAULT_BASE_IRI;
use spargebra::Query;

/// Form-aware SPARQL parser
///
/// Relative IRIs in query text resolve against the parser's base IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParser {
    base_iri: String,
}

impl QueryParser {
    /// Create a parser resolving against `base_iri`
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            base_iri: base_iri.into(),
        }
    }

    /// Base IRI used for relative references
    pub fn base_iri(&self) -> &str {
        &self.base_iri
    }

    /// Parse `text` as a query of the requested form
    pub fn parse(&self, text: &str, form: QueryForm) -> SparqlResult<ParsedQuery> {
        match form {
            QueryForm::Ask => self.parse_as::<BooleanQuery>(text).map(ParsedQuery::Ask),
            QueryForm::Select => self.parse_as::<TupleQuery>(text).map(ParsedQuery::Select),
            QueryForm::Construct => self.parse_as::<GraphQuery>(text).map(ParsedQuery::Construct),
            QueryForm::Describe => self.parse_as::<DescribeQuery>(text).map(ParsedQuery::Describe),
        }
    }

    /// Parse `text` as the form `T` stands for
    ///
    /// Text that does not parse is `MalformedQuery`; text that parses as
    /// another form is `QueryFormMismatch`.
    pub fn parse_as<T: QueryShape>(&self, text: &str) -> SparqlResult<T> {
        let query = self.parse_algebra(text)?;
        T::cast(query).map_err(|other| SparqlError::QueryFormMismatch {
            expected: T::FORM,
            actual: QueryForm::of(&other),
        })
    }

    /// Parse `text` whatever its form
    pub fn parse_any(&self, text: &str) -> SparqlResult<ParsedQuery> {
        self.parse_algebra(text).map(ParsedQuery::from_query)
    }

    fn parse_algebra(&self, text: &str) -> SparqlResult<Query> {
        Query::parse(text, Some(&self.base_iri)).map_err(|e| SparqlError::MalformedQuery {
            message: e.to_string(),
            text: text.to_string(),
        })
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_IRI)
    }
}
