//! In-memory description graph
//!
//! A small triple set used to carry resource descriptions (generators, query
//! templates) between the catalog, the resolver and the generator builder.
//! Triples keep their insertion order, which is the order callers observe
//! when enumerating subjects.

use super::types::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet, VecDeque};

/// Description graph with a subject index
///
/// Duplicate inserts collapse (set semantics). Removal is not supported, so
/// positions recorded in the subject index stay valid.
#[derive(Debug, Clone, Default)]
pub struct DescriptionGraph {
    /// All triples, in insertion order
    triples: IndexSet<Triple>,

    /// Subject -> positions in `triples`
    subject_index: HashMap<RdfSubject, Vec<usize>>,
}

impl DescriptionGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple; returns false if it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        let subject = triple.subject.clone();
        let (pos, inserted) = self.triples.insert_full(triple);
        if inserted {
            self.subject_index.entry(subject).or_default().push(pos);
        }
        inserted
    }

    /// Insert every triple of `other` (graph union)
    pub fn merge(&mut self, other: &DescriptionGraph) {
        for triple in other.iter() {
            self.insert(triple.clone());
        }
    }

    /// Check for a (subject, predicate, object) statement
    pub fn has(&self, subject: &RdfSubject, predicate: &NamedNode, object: &RdfObject) -> bool {
        self.with_subject(subject)
            .any(|t| t.predicate.as_named_node() == predicate && &t.object == object)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get an iterator over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples whose subject is `subject`, in insertion order
    pub fn with_subject<'a>(&'a self, subject: &RdfSubject) -> impl Iterator<Item = &'a Triple> + 'a {
        self.subject_index
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(move |pos| self.triples.get_index(*pos))
    }

    /// All objects of `subject predicate ?o`, in insertion order
    pub fn objects<'a>(&'a self, subject: &RdfSubject, predicate: &NamedNode) -> Vec<&'a RdfObject> {
        self.with_subject(subject)
            .filter(|t| t.predicate.as_named_node() == predicate)
            .map(|t| &t.object)
            .collect()
    }

    /// Subjects of `?s predicate object`, deduplicated, in insertion order
    pub fn subjects_with(&self, predicate: &NamedNode, object: &RdfObject) -> Vec<RdfSubject> {
        let mut seen = IndexSet::new();
        for triple in &self.triples {
            if triple.predicate.as_named_node() == predicate && &triple.object == object {
                seen.insert(triple.subject.clone());
            }
        }
        seen.into_iter().collect()
    }

    /// Subjects typed with `class` (`?s rdf:type class`)
    pub fn subjects_of_type(&self, class: &NamedNode) -> Vec<RdfSubject> {
        let rdf_type = super::vocab::term(super::vocab::rdf::TYPE);
        self.subjects_with(&rdf_type, &RdfObject::NamedNode(class.clone()))
    }

    /// Extract the sub-graph reachable from `root`
    ///
    /// Includes every triple whose subject is `root` or any resource reachable
    /// from it through object positions. Cycles are visited once.
    pub fn extract_subtree(&self, root: &RdfSubject) -> DescriptionGraph {
        let mut result = DescriptionGraph::new();
        let mut visited: HashSet<RdfSubject> = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(root.clone());

        while let Some(subject) = queue.pop_front() {
            if !visited.insert(subject.clone()) {
                continue;
            }
            for triple in self.with_subject(&subject) {
                result.insert(triple.clone());
                if let Some(next) = triple.object.as_subject() {
                    if !visited.contains(&next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        result
    }

    /// Convenience insert from parts
    pub fn add(&mut self, subject: impl Into<RdfSubject>, predicate: NamedNode, object: impl Into<RdfObject>) {
        self.insert(Triple::new(subject.into(), RdfPredicate::from(predicate), object.into()));
    }
}

impl FromIterator<Triple> for DescriptionGraph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut graph = DescriptionGraph::new();
        for triple in iter {
            graph.insert(triple);
        }
        graph
    }
}
