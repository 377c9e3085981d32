//! Test generators
//!
//! A test generator bundles a query with the patterns it is based on. It is
//! described in RDF:
//!
//! ```turtle
//! ex:gen a qt:TestGenerator ;
//!     qt:queryTemplate ex:countTemplate ;   # or qt:generatorQuery "SELECT ..."
//!     qt:basedOnPattern ex:pattern1, ex:pattern2 ;
//!     rdfs:comment "Counts every resource" .
//! ```
//!
//! [`GeneratorBuilder`] validates such a description and produces an
//! immutable [`TestGenerator`].

mod builder;
mod model;

pub use builder::GeneratorBuilder;
pub use model::{GeneratorQuery, TestGenerator};

use crate::rdf::RdfSubject;
use crate::sparql::SparqlError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Generator errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// Resource is not typed `qt:TestGenerator`
    #[error("Resource {0} is not a test generator")]
    TypeMismatch(RdfSubject),

    /// More than one query source
    #[error("Generator {0} has more than one query source")]
    AmbiguousQuerySource(RdfSubject),

    /// No query source
    #[error("Generator {0} has no query source")]
    MissingQuerySource(RdfSubject),

    /// Property value of the wrong term kind
    #[error("Generator {id}: {property} must be {expected}")]
    InvalidPropertyValue {
        id: RdfSubject,
        property: &'static str,
        expected: &'static str,
    },

    /// Template resolution failed
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Generator query failed to parse
    #[error("Query error: {0}")]
    Query(#[from] SparqlError),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
