//! Fixed vocabulary read from description graphs
//!
//! Generator descriptions use the `qt:` namespace; query templates are
//! described with SPIN, and template prefixes with SHACL prefix declarations.

use super::NamedNode;

/// Namespace of the generator vocabulary
pub const QT_NS: &str = "http://w3id.org/sparql-templates/vocab#";

pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

pub mod rdfs {
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

pub mod xsd {
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

pub mod qt {
    /// Class of test generator resources
    pub const TEST_GENERATOR: &str = "http://w3id.org/sparql-templates/vocab#TestGenerator";
    /// Inline generator query text (literal)
    pub const GENERATOR_QUERY: &str = "http://w3id.org/sparql-templates/vocab#generatorQuery";
    /// Reference to a stored query template (IRI)
    pub const QUERY_TEMPLATE: &str = "http://w3id.org/sparql-templates/vocab#queryTemplate";
    /// Pattern the generator is based on (IRI, repeatable)
    pub const BASED_ON_PATTERN: &str = "http://w3id.org/sparql-templates/vocab#basedOnPattern";
}

pub mod spin {
    pub const TEMPLATE: &str = "http://spinrdf.org/spin#Template";
    pub const BODY: &str = "http://spinrdf.org/spin#body";
}

pub mod sp {
    pub const TEXT: &str = "http://spinrdf.org/sp#text";
    pub const ASK: &str = "http://spinrdf.org/sp#Ask";
    pub const SELECT: &str = "http://spinrdf.org/sp#Select";
    pub const CONSTRUCT: &str = "http://spinrdf.org/sp#Construct";
    pub const DESCRIBE: &str = "http://spinrdf.org/sp#Describe";
}

pub mod sh {
    pub const DECLARE: &str = "http://www.w3.org/ns/shacl#declare";
    pub const PREFIX: &str = "http://www.w3.org/ns/shacl#prefix";
    pub const NAMESPACE: &str = "http://www.w3.org/ns/shacl#namespace";
}

/// Named node for one of the vocabulary constants above
pub fn term(iri: &'static str) -> NamedNode {
    NamedNode::from_static(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_valid_iris() {
        for iri in [
            rdf::TYPE,
            rdfs::LABEL,
            rdfs::COMMENT,
            xsd::ANY_URI,
            qt::TEST_GENERATOR,
            qt::GENERATOR_QUERY,
            qt::QUERY_TEMPLATE,
            qt::BASED_ON_PATTERN,
            spin::TEMPLATE,
            spin::BODY,
            sp::TEXT,
            sp::ASK,
            sp::SELECT,
            sp::CONSTRUCT,
            sp::DESCRIBE,
            sh::DECLARE,
            sh::PREFIX,
            sh::NAMESPACE,
        ] {
            assert!(NamedNode::new(iri).is_ok(), "{}", iri);
        }
        assert!(qt::TEST_GENERATOR.starts_with(QT_NS));
    }
}
