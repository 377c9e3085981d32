//! Stored query templates and template references
//!
//! Query templates are described in RDF with SPIN:
//!
//! ```turtle
//! ex:labels a spin:Template ;
//!     rdfs:label "Labels" ;
//!     spin:body [ a sp:Select ; sp:text "SELECT ?s ?l WHERE { ?s rdfs:label ?l }" ] ;
//!     sh:declare [ sh:prefix "ex" ; sh:namespace "http://example.org/"^^xsd:anyURI ] .
//! ```
//!
//! A generator description may point at such a template with
//! `qt:queryTemplate`. [`TemplateReferenceResolver`] pulls referenced
//! descriptions out of a [`TemplateCatalog`] so the description becomes
//! self-contained.

pub mod catalog;
pub mod definition;
pub mod resolver;

pub use catalog::{GraphCatalog, InMemoryCatalog, TemplateCatalog};
pub use definition::{defined_templates, is_defined, read_template, write_template};
pub use resolver::TemplateReferenceResolver;

use crate::rdf::{NamedNode, RdfObject, RdfSubject};
use thiserror::Error;

/// Template errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Referenced template is neither defined locally nor in the catalog
    #[error("Unresolved template reference: {0}")]
    UnresolvedTemplateReference(NamedNode),

    /// Template is defined both locally and in the catalog
    #[error("Duplicate template definition: {0}")]
    DuplicateTemplateDefinition(NamedNode),

    /// Reference object is not an IRI
    #[error("Invalid template reference from {subject}: {value}")]
    InvalidTemplateReference { subject: RdfSubject, value: RdfObject },

    /// Template description is incomplete or inconsistent
    #[error("Invalid template {id}: {reason}")]
    InvalidTemplate { id: NamedNode, reason: String },

    /// Catalog lookup failed
    #[error("Catalog error: {0}")]
    Catalog(String),
}

pub type TemplateResult<T> = Result<T, TemplateError>;
