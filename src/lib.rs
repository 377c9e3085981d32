//! SPARQL query templates and test generators
//!
//! Stores SPARQL queries as templates (raw text plus prefix bindings),
//! parses them into typed query forms, decomposes SELECT algebra back into
//! its clauses and builds test generators from RDF descriptions that may
//! reference stored templates.
//!
//! # Modules
//!
//! - [`rdf`]: RDF terms, description graphs, Turtle I/O and vocabulary
//! - [`sparql`]: prefix binding, form-aware parsing and SELECT decomposition
//! - [`templates`]: template descriptions, catalogs and reference resolution
//! - [`generator`]: test generator construction
//! - [`config`]: base IRI and standard prefixes
//!
//! ## Example Usage
//!
//! ```rust
//! use sparql_templates::rdf::{RdfFormat, RdfParser};
//! use sparql_templates::{GeneratorBuilder, InMemoryCatalog, SparqlEngine};
//! use std::sync::Arc;
//!
//! let graph = RdfParser::parse(r#"
//!     @prefix qt: <http://w3id.org/sparql-templates/vocab#> .
//!     <http://example.org/gen> a qt:TestGenerator ;
//!         qt:generatorQuery "SELECT ?b ?a WHERE { ?a rdfs:label ?b }" .
//! "#, RdfFormat::Turtle).unwrap();
//!
//! let builder = GeneratorBuilder::new(Arc::new(InMemoryCatalog::new()));
//! let generators = builder.build_all(&graph).unwrap();
//!
//! let select = generators[0].decompose(&SparqlEngine::default()).unwrap();
//! assert_eq!(select.projection_result_vars(), vec!["b", "a"]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod generator;
pub mod rdf;
pub mod sparql;
pub mod templates;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, TemplateConfig, DEFAULT_BASE_IRI};

pub use generator::{
    GeneratorBuilder, GeneratorError, GeneratorQuery, GeneratorResult, TestGenerator,
};

pub use rdf::{
    DescriptionGraph, NamedNode, BlankNode, Literal, Triple,
    RdfSubject, RdfPredicate, RdfObject,
    NamespaceManager, RdfFormat, RdfParser, RdfSerializer,
};

pub use sparql::{
    AlgebraDecomposer, ClauseKind, DecomposedSelect, ParsedQuery, PrefixBinder, QueryForm,
    QueryModifier, QueryParser, QueryTemplate, SparqlEngine, SparqlError, SparqlResult,
};

pub use templates::{
    GraphCatalog, InMemoryCatalog, TemplateCatalog, TemplateError, TemplateReferenceResolver,
    TemplateResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
