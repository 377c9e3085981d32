//! Turtle and N-Triples implementation

use super::{ParseError, ParseResult, RdfFormat, SerializeError, SerializeResult};
use crate::rdf::{
    BlankNode, DescriptionGraph, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple,
};
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleFormatter, TurtleParser};
use std::collections::HashMap;
use std::io::{BufReader, Cursor};

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse a Turtle document into a graph
    pub fn parse(input: &str) -> ParseResult<DescriptionGraph> {
        let mut reader = BufReader::new(Cursor::new(input));
        let mut parser = TurtleParser::new(&mut reader, None);
        collect(&mut parser)
    }

    /// Parse an N-Triples document into a graph
    pub fn parse_ntriples(input: &str) -> ParseResult<DescriptionGraph> {
        let mut reader = BufReader::new(Cursor::new(input));
        let mut parser = NTriplesParser::new(&mut reader);
        collect(&mut parser)
    }
}

fn collect<P>(parser: &mut P) -> ParseResult<DescriptionGraph>
where
    P: TriplesParser,
    ParseError: From<P::Error>,
{
    let mut graph = DescriptionGraph::new();
    let mut blank_nodes = BlankNodeScope::default();
    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        let subject = convert_subject(t.subject, &mut blank_nodes)?;
        let predicate = convert_predicate(t.predicate)?;
        let object = convert_object(t.object, &mut blank_nodes)?;
        graph.insert(Triple::new(subject, predicate, object));
        Ok(())
    })?;
    Ok(graph)
}

/// Blank node labels of one document, each mapped to a fresh node
#[derive(Default)]
struct BlankNodeScope {
    nodes: HashMap<String, BlankNode>,
}

impl BlankNodeScope {
    fn node(&mut self, label: &str) -> BlankNode {
        self.nodes.entry(label.to_string()).or_default().clone()
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize a graph as Turtle or N-Triples
    pub fn serialize(graph: &DescriptionGraph, format: RdfFormat) -> SerializeResult<String> {
        let mut output = Vec::new();
        match format {
            RdfFormat::Turtle => {
                let mut formatter = TurtleFormatter::new(&mut output);
                for triple in graph.iter() {
                    format_triple(&mut formatter, triple)?;
                }
                formatter.finish()?;
            }
            RdfFormat::NTriples => {
                let mut formatter = NTriplesFormatter::new(&mut output);
                for triple in graph.iter() {
                    format_triple(&mut formatter, triple)?;
                }
                formatter.finish()?;
            }
        }

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

fn format_triple<F>(formatter: &mut F, triple: &Triple) -> SerializeResult<()>
where
    F: TriplesFormatter<Error = std::io::Error>,
{
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => rio_api::model::Subject::NamedNode(rio_api::model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => rio_api::model::Subject::BlankNode(rio_api::model::BlankNode { id: b.as_str() }),
    };

    let predicate = rio_api::model::NamedNode {
        iri: triple.predicate.as_named_node().as_str(),
    };

    let datatype;
    let object = match &triple.object {
        RdfObject::NamedNode(n) => rio_api::model::Term::NamedNode(rio_api::model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => rio_api::model::Term::BlankNode(rio_api::model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => {
            if let Some(language) = l.language() {
                rio_api::model::Term::Literal(rio_api::model::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                })
            } else {
                datatype = l.datatype();
                if datatype.as_str() == XSD_STRING {
                    rio_api::model::Term::Literal(rio_api::model::Literal::Simple { value: l.value() })
                } else {
                    rio_api::model::Term::Literal(rio_api::model::Literal::Typed {
                        value: l.value(),
                        datatype: rio_api::model::NamedNode { iri: datatype.as_str() },
                    })
                }
            }
        }
    };

    formatter.format(&rio_api::model::Triple {
        subject,
        predicate,
        object,
    })?;
    Ok(())
}

fn convert_subject(s: rio_api::model::Subject, blank_nodes: &mut BlankNodeScope) -> Result<RdfSubject, ParseError> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(blank_nodes.node(b.id))),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: rio_api::model::NamedNode) -> Result<RdfPredicate, ParseError> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: rio_api::model::Term, blank_nodes: &mut BlankNodeScope) -> Result<RdfObject, ParseError> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(blank_nodes.node(b.id))),
        rio_api::model::Term::Literal(l) => match l {
            rio_api::model::Literal::Simple { value } => Ok(RdfObject::Literal(Literal::new_simple_literal(value))),
            rio_api::model::Literal::LanguageTaggedString { value, language } => Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)
                    .map_err(|e| ParseError::Parse(e.to_string()))?,
            )),
            rio_api::model::Literal::Typed { value, datatype } => {
                let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
                Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
            }
        },
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}
