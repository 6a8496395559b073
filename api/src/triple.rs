//! An RDF triple expresses a single fact.
//! It is formed of three terms called *subject*, *predicate* and *object*.
//! A [`Quad`] adds an optional *graph name* to a triple.
use crate::term::{Node, TermKind};
use std::fmt;
use thiserror::Error;

/// A triple whose positions have been checked:
/// the subject is an IRI or a blank node, the predicate is an IRI.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct Triple {
    subject: Node,
    predicate: Node,
    object: Node,
}

impl Triple {
    /// Build a triple, checking that every term is allowed in its position.
    pub fn new(subject: Node, predicate: Node, object: Node) -> Result<Self, InvalidTriple> {
        if subject.is_literal() {
            return Err(InvalidTriple::Subject(subject.kind()));
        }
        if !predicate.is_iri() {
            return Err(InvalidTriple::Predicate(predicate.kind()));
        }
        Ok(Triple {
            subject,
            predicate,
            object,
        })
    }

    /// Build a triple without checking the subject and predicate.
    ///
    /// This allows [generalized RDF](https://www.w3.org/TR/rdf11-concepts/#section-generalized-rdf),
    /// and should only be used by parsers explicitly configured to produce it.
    pub fn new_generalized(subject: Node, predicate: Node, object: Node) -> Self {
        Triple {
            subject,
            predicate,
            object,
        }
    }

    pub fn s(&self) -> &Node {
        &self.subject
    }

    pub fn p(&self) -> &Node {
        &self.predicate
    }

    pub fn o(&self) -> &Node {
        &self.object
    }

    /// Consume this triple into its three components.
    pub fn into_spo(self) -> [Node; 3] {
        [self.subject, self.predicate, self.object]
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A triple, optionally in a named graph.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct Quad {
    triple: Triple,
    graph: Option<Node>,
}

impl Quad {
    /// Build a quad, checking that the graph name (if any) is an IRI or a blank node.
    pub fn new(triple: Triple, graph: Option<Node>) -> Result<Self, InvalidTriple> {
        match &graph {
            Some(g) if g.is_literal() => Err(InvalidTriple::GraphName(g.kind())),
            _ => Ok(Quad { triple, graph }),
        }
    }

    /// A quad in the default graph.
    pub fn in_default_graph(triple: Triple) -> Self {
        Quad {
            triple,
            graph: None,
        }
    }

    pub fn triple(&self) -> &Triple {
        &self.triple
    }

    pub fn s(&self) -> &Node {
        self.triple.s()
    }

    pub fn p(&self) -> &Node {
        self.triple.p()
    }

    pub fn o(&self) -> &Node {
        self.triple.o()
    }

    /// The graph name, `None` meaning the default graph.
    pub fn g(&self) -> Option<&Node> {
        self.graph.as_ref()
    }

    pub fn into_parts(self) -> (Triple, Option<Node>) {
        (self.triple, self.graph)
    }
}

impl From<Triple> for Quad {
    fn from(value: Triple) -> Self {
        Quad::in_default_graph(value)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.graph {
            None => write!(f, "{}", self.triple),
            Some(g) => write!(
                f,
                "{} {} {} {} .",
                self.triple.subject, self.triple.predicate, self.triple.object, g
            ),
        }
    }
}

/// This error is raised when a term is not allowed in the position it was parsed in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidTriple {
    #[error("a {0:?} is not allowed as subject")]
    Subject(TermKind),
    #[error("a {0:?} is not allowed as predicate")]
    Predicate(TermKind),
    #[error("a {0:?} is not allowed as graph name")]
    GraphName(TermKind),
}
