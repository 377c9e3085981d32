//! Reading and writing SPIN template descriptions

use super::{TemplateError, TemplateResult};
use crate::rdf::vocab::{self, rdf, rdfs, sh, sp, spin, xsd};
use crate::rdf::{BlankNode, DescriptionGraph, Literal, NamedNode, RdfObject, RdfSubject};
use crate::sparql::{QueryForm, QueryTemplate};

/// True when `graph` types `id` as `spin:Template`
pub fn is_defined(graph: &DescriptionGraph, id: &NamedNode) -> bool {
    graph.has(
        &RdfSubject::NamedNode(id.clone()),
        &vocab::term(rdf::TYPE),
        &RdfObject::NamedNode(vocab::term(spin::TEMPLATE)),
    )
}

/// All templates defined in `graph`, in insertion order
pub fn defined_templates(graph: &DescriptionGraph) -> Vec<NamedNode> {
    graph
        .subjects_of_type(&vocab::term(spin::TEMPLATE))
        .into_iter()
        .filter_map(|subject| subject.as_named_node().cloned())
        .collect()
}

/// Read the template `id` from its description
///
/// The description needs exactly one `spin:body` node typed with a SPIN
/// query class and carrying exactly one `sp:text` literal.
pub fn read_template(graph: &DescriptionGraph, id: &NamedNode) -> TemplateResult<QueryTemplate> {
    let invalid = |reason: &str| TemplateError::InvalidTemplate {
        id: id.clone(),
        reason: reason.to_string(),
    };

    if !is_defined(graph, id) {
        return Err(invalid("not typed spin:Template"));
    }
    let subject = RdfSubject::NamedNode(id.clone());

    let body = match graph.objects(&subject, &vocab::term(spin::BODY)).as_slice() {
        [body] => body.as_subject().ok_or_else(|| invalid("spin:body is a literal"))?,
        [] => return Err(invalid("missing spin:body")),
        _ => return Err(invalid("more than one spin:body")),
    };

    let form = graph
        .objects(&body, &vocab::term(rdf::TYPE))
        .into_iter()
        .filter_map(|class| class.as_named_node())
        .find_map(|class| QueryForm::from_spin_class(class.as_str()))
        .ok_or_else(|| invalid("query body has no SPIN query class"))?;

    let text = match graph.objects(&body, &vocab::term(sp::TEXT)).as_slice() {
        [RdfObject::Literal(text)] => text.value().to_string(),
        [_] => return Err(invalid("sp:text is not a literal")),
        [] => return Err(invalid("missing sp:text")),
        _ => return Err(invalid("more than one sp:text")),
    };

    let mut template = QueryTemplate::new(id.clone(), form, text);
    if let Some(label) = first_literal(graph, &subject, rdfs::LABEL) {
        template = template.with_label(label);
    }
    if let Some(description) = first_literal(graph, &subject, rdfs::COMMENT) {
        template = template.with_description(description);
    }

    for declaration in graph.objects(&subject, &vocab::term(sh::DECLARE)) {
        let declaration = declaration
            .as_subject()
            .ok_or_else(|| invalid("sh:declare is a literal"))?;
        let prefix = first_literal(graph, &declaration, sh::PREFIX)
            .ok_or_else(|| invalid("prefix declaration without sh:prefix"))?;
        let namespace = first_literal(graph, &declaration, sh::NAMESPACE)
            .ok_or_else(|| invalid("prefix declaration without sh:namespace"))?;
        template = template.with_prefix(prefix, namespace);
    }

    Ok(template)
}

/// Describe `template` as a SPIN template
pub fn write_template(template: &QueryTemplate) -> DescriptionGraph {
    let mut graph = DescriptionGraph::new();
    let id = template.id().clone();

    graph.add(id.clone(), vocab::term(rdf::TYPE), vocab::term(spin::TEMPLATE));
    if let Some(label) = template.label() {
        graph.add(id.clone(), vocab::term(rdfs::LABEL), Literal::new_simple_literal(label));
    }
    if let Some(description) = template.description() {
        graph.add(id.clone(), vocab::term(rdfs::COMMENT), Literal::new_simple_literal(description));
    }

    let body = BlankNode::new();
    graph.add(id.clone(), vocab::term(spin::BODY), body.clone());
    graph.add(
        body.clone(),
        vocab::term(rdf::TYPE),
        vocab::term(template.form().spin_class()),
    );
    graph.add(body, vocab::term(sp::TEXT), Literal::new_simple_literal(template.text()));

    for (prefix, namespace) in template.prefixes() {
        let declaration = BlankNode::new();
        graph.add(id.clone(), vocab::term(sh::DECLARE), declaration.clone());
        graph.add(
            declaration.clone(),
            vocab::term(sh::PREFIX),
            Literal::new_simple_literal(prefix.as_str()),
        );
        graph.add(
            declaration,
            vocab::term(sh::NAMESPACE),
            Literal::new_typed_literal(namespace.as_str(), vocab::term(xsd::ANY_URI)),
        );
    }

    graph
}

fn first_literal(graph: &DescriptionGraph, subject: &RdfSubject, predicate: &'static str) -> Option<String> {
    graph
        .objects(subject, &vocab::term(predicate))
        .into_iter()
        .find_map(|object| object.as_literal())
        .map(|literal| literal.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{RdfFormat, RdfParser};

    const TEMPLATE_TTL: &str = r#"
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix spin: <http://spinrdf.org/spin#> .
        @prefix sp: <http://spinrdf.org/sp#> .
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix ex: <http://example.org/templates/> .

        ex:labels a spin:Template ;
            rdfs:label "Labels" ;
            rdfs:comment "Every labelled resource" ;
            spin:body [ a sp:Select ; sp:text "SELECT ?s ?l WHERE { ?s ex:label ?l }" ] ;
            sh:declare [ sh:prefix "ex" ; sh:namespace "http://example.org/vocab#" ] .
    "#;

    fn labels() -> NamedNode {
        NamedNode::new("http://example.org/templates/labels").unwrap()
    }

    #[test]
    fn test_read_template() {
        let graph = RdfParser::parse(TEMPLATE_TTL, RdfFormat::Turtle).unwrap();
        assert!(is_defined(&graph, &labels()));
        assert_eq!(defined_templates(&graph), vec![labels()]);

        let template = read_template(&graph, &labels()).unwrap();
        assert_eq!(template.form(), QueryForm::Select);
        assert_eq!(template.text(), "SELECT ?s ?l WHERE { ?s ex:label ?l }");
        assert_eq!(template.label(), Some("Labels"));
        assert_eq!(template.description(), Some("Every labelled resource"));
        assert_eq!(
            template.prefixes().get("ex").map(String::as_str),
            Some("http://example.org/vocab#")
        );
    }

    #[test]
    fn test_read_undefined_template() {
        let graph = DescriptionGraph::new();
        let err = read_template(&graph, &labels()).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_read_template_without_text() {
        let mut graph = DescriptionGraph::new();
        let body = BlankNode::new();
        graph.add(labels(), vocab::term(rdf::TYPE), vocab::term(spin::TEMPLATE));
        graph.add(labels(), vocab::term(spin::BODY), body.clone());
        graph.add(body, vocab::term(rdf::TYPE), vocab::term(sp::ASK));

        match read_template(&graph, &labels()).unwrap_err() {
            TemplateError::InvalidTemplate { id, reason } => {
                assert_eq!(id, labels());
                assert!(reason.contains("sp:text"));
            }
            other => panic!("Expected InvalidTemplate, got {:?}", other),
        }
    }

    #[test]
    fn test_write_then_read() {
        let template = QueryTemplate::new(labels(), QueryForm::Ask, "ASK { ?s ex:p ?o }")
            .with_label("Any")
            .with_prefix("ex", "http://example.org/");

        let graph = write_template(&template);
        assert_eq!(read_template(&graph, &labels()).unwrap(), template);
    }
}
