//! Typed parsed queries, one type per query form

use super::decompose::{AlgebraDecomposer, DecomposedSelect};
use super::form::QueryForm;
use super::{SparqlError, SparqlResult};
use spargebra::algebra::GraphPattern;
use spargebra::term::TriplePattern as TemplateTriple;
use spargebra::Query;
use std::fmt;

/// A query form with its own cast step
///
/// `cast` hands the query back unchanged when it has another form, so the
/// caller can report what was actually parsed.
pub trait QueryShape: Sized {
    /// Form this type represents
    const FORM: QueryForm;

    /// Take a parsed query if it has this form
    fn cast(query: Query) -> Result<Self, Query>;

    /// The underlying algebra
    fn query(&self) -> &Query;

    /// Root of the query's algebra tree
    fn pattern(&self) -> &GraphPattern {
        pattern_of(self.query())
    }
}

fn pattern_of(query: &Query) -> &GraphPattern {
    match query {
        Query::Select { pattern, .. }
        | Query::Ask { pattern, .. }
        | Query::Construct { pattern, .. }
        | Query::Describe { pattern, .. } => pattern,
    }
}

macro_rules! query_shape {
    ($(#[$doc:meta])* $name:ident, $form:expr, $variant:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Query);

        impl QueryShape for $name {
            const FORM: QueryForm = $form;

            fn cast(query: Query) -> Result<Self, Query> {
                if matches!(query, Query::$variant { .. }) {
                    Ok(Self(query))
                } else {
                    Err(query)
                }
            }

            fn query(&self) -> &Query {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

query_shape!(
    /// Parsed ASK query
    BooleanQuery, QueryForm::Ask, Ask
);
query_shape!(
    /// Parsed SELECT query
    TupleQuery, QueryForm::Select, Select
);
query_shape!(
    /// Parsed CONSTRUCT query
    GraphQuery, QueryForm::Construct, Construct
);
query_shape!(
    /// Parsed DESCRIBE query
    DescribeQuery, QueryForm::Describe, Describe
);

impl TupleQuery {
    /// Decompose the algebra into SELECT clauses
    pub fn decompose(&self) -> SparqlResult<DecomposedSelect> {
        AlgebraDecomposer::decompose(self.pattern())
    }

    /// Projected variable names in declaration order
    pub fn projection_result_vars(&self) -> SparqlResult<Vec<String>> {
        Ok(self.decompose()?.projection_result_vars())
    }
}

impl GraphQuery {
    /// Triple templates of the CONSTRUCT clause
    pub fn template(&self) -> &[TemplateTriple] {
        match &self.0 {
            Query::Construct { template, .. } => template,
            _ => &[],
        }
    }
}

/// A parsed query of any form
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedQuery {
    /// ASK
    Ask(BooleanQuery),
    /// SELECT
    Select(TupleQuery),
    /// CONSTRUCT
    Construct(GraphQuery),
    /// DESCRIBE
    Describe(DescribeQuery),
}

impl ParsedQuery {
    /// Wrap a parsed query in the variant matching its form
    pub fn from_query(query: Query) -> Self {
        match QueryForm::of(&query) {
            QueryForm::Ask => ParsedQuery::Ask(BooleanQuery(query)),
            QueryForm::Select => ParsedQuery::Select(TupleQuery(query)),
            QueryForm::Construct => ParsedQuery::Construct(GraphQuery(query)),
            QueryForm::Describe => ParsedQuery::Describe(DescribeQuery(query)),
        }
    }

    /// Form of the query
    pub fn form(&self) -> QueryForm {
        match self {
            ParsedQuery::Ask(_) => QueryForm::Ask,
            ParsedQuery::Select(_) => QueryForm::Select,
            ParsedQuery::Construct(_) => QueryForm::Construct,
            ParsedQuery::Describe(_) => QueryForm::Describe,
        }
    }

    /// The underlying algebra
    pub fn query(&self) -> &Query {
        match self {
            ParsedQuery::Ask(q) => q.query(),
            ParsedQuery::Select(q) => q.query(),
            ParsedQuery::Construct(q) => q.query(),
            ParsedQuery::Describe(q) => q.query(),
        }
    }

    /// Root of the query's algebra tree
    pub fn pattern(&self) -> &GraphPattern {
        pattern_of(self.query())
    }

    /// The SELECT query, or a form mismatch
    pub fn into_select(self) -> SparqlResult<TupleQuery> {
        match self {
            ParsedQuery::Select(q) => Ok(q),
            other => Err(SparqlError::QueryFormMismatch {
                expected: QueryForm::Select,
                actual: other.form(),
            }),
        }
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query())
    }
}
