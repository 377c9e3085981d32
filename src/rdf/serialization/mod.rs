//! RDF serialization formats for description graphs
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)

mod turtle;

use super::DescriptionGraph;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error reported by the Turtle/N-Triples parser
    #[error("Syntax error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// Term rejected while building the graph
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<DescriptionGraph> {
        let graph = match format {
            RdfFormat::Turtle => TurtleParserWrapper::parse(input)?,
            RdfFormat::NTriples => TurtleParserWrapper::parse_ntriples(input)?,
        };
        debug!("Parsed {} triples ({:?})", graph.len(), format);
        Ok(graph)
    }

    /// Parse RDF data from a file
    pub fn parse_file(path: &Path, format: RdfFormat) -> ParseResult<DescriptionGraph> {
        let input = std::fs::read_to_string(path)?;
        Self::parse(&input, format)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize a graph to a string
    pub fn serialize(graph: &DescriptionGraph, format: RdfFormat) -> SerializeResult<String> {
        TurtleSerializerWrapper::serialize(graph, format)
    }

    /// Serialize a graph to a file
    pub fn serialize_file(graph: &DescriptionGraph, path: &Path, format: RdfFormat) -> SerializeResult<()> {
        let output = Self::serialize(graph, format)?;
        std::fs::write(path, output)?;
        Ok(())
    }
}
