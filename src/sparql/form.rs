//! Query forms

use crate::rdf::vocab::sp;
use serde::{Deserialize, Serialize};
use spargebra::Query;
use std::fmt;

/// The shape of a SPARQL query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryForm {
    /// Boolean result (ASK)
    Ask,
    /// Tuple/projection result (SELECT)
    Select,
    /// Graph construction (CONSTRUCT)
    Construct,
    /// Resource description (DESCRIBE)
    Describe,
}

impl QueryForm {
    /// Form of an already parsed query
    pub fn of(query: &Query) -> Self {
        match query {
            Query::Ask { .. } => QueryForm::Ask,
            Query::Select { .. } => QueryForm::Select,
            Query::Construct { .. } => QueryForm::Construct,
            Query::Describe { .. } => QueryForm::Describe,
        }
    }

    /// SPIN class describing queries of this form
    pub fn spin_class(&self) -> &'static str {
        match self {
            QueryForm::Ask => sp::ASK,
            QueryForm::Select => sp::SELECT,
            QueryForm::Construct => sp::CONSTRUCT,
            QueryForm::Describe => sp::DESCRIBE,
        }
    }

    /// Inverse of [`QueryForm::spin_class`]
    pub fn from_spin_class(iri: &str) -> Option<Self> {
        match iri {
            sp::ASK => Some(QueryForm::Ask),
            sp::SELECT => Some(QueryForm::Select),
            sp::CONSTRUCT => Some(QueryForm::Construct),
            sp::DESCRIBE => Some(QueryForm::Describe),
            _ => None,
        }
    }
}

impl fmt::Display for QueryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            QueryForm::Ask => "ASK",
            QueryForm::Select => "SELECT",
            QueryForm::Construct => "CONSTRUCT",
            QueryForm::Describe => "DESCRIBE",
        };
        f.write_str(keyword)
    }
}
