//! RDF (Resource Description Framework) support
//!
//! This module provides the RDF layer the template machinery reads from:
//! - RDF terms and triples (wrappers over `oxrdf`)
//! - An in-memory description graph with sub-tree extraction
//! - Turtle and N-Triples I/O
//! - Namespace prefixes, including the standard prefix set
//! - The fixed vocabulary of generator and template descriptions
//!
//! # Example
//!
//! ```rust
//! use sparql_templates::rdf::{DescriptionGraph, Triple, NamedNode, Literal, RdfPredicate};
//!
//! let mut graph = DescriptionGraph::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//!
//! graph.insert(Triple::new(subject.clone().into(), predicate, object.into()));
//!
//! let results: Vec<_> = graph.with_subject(&subject.into()).collect();
//! assert_eq!(results.len(), 1);
//! ```

mod types;
mod graph;
mod namespace;
mod serialization;
pub mod vocab;

pub use types::{
    RdfError, RdfResult,
    RdfSubject, RdfPredicate, RdfObject,
    NamedNode, BlankNode, Literal, Triple,
};

pub use graph::DescriptionGraph;

pub use namespace::{
    NamespaceManager,
    PrefixError, PrefixResult,
    STANDARD_PREFIXES,
};

pub use serialization::{
    RdfFormat, RdfParser, RdfSerializer,
    ParseError, ParseResult,
    SerializeError, SerializeResult,
};
