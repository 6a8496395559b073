//! I define how RDF terms
//! ([IRIs](https://www.w3.org/TR/rdf11-concepts/#section-IRIs),
//! [blank nodes](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
//! and [literals](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal))
//! are represented while parsing.
use crate::ns::{rdf, xsd};

mod _display;

pub mod bnode_id;
pub mod language_tag;

pub use bnode_id::BnodeId;
pub use language_tag::LanguageTag;

/// The different kinds of terms that a [`Node`] can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum TermKind {
    /// An [RDF IRI](https://www.w3.org/TR/rdf11-concepts/#section-IRIs)
    Iri,
    /// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal)
    Literal,
    /// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
    BlankNode,
}

/// A parsed RDF term.
///
/// Blank node identifiers are scoped to the document they were parsed from:
/// the same identifier denotes the same node within one parse only.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum Node {
    /// An IRI, kept as the (absolute) text it was parsed or resolved to
    Iri(Box<str>),
    /// A blank node
    BlankNode(BnodeId),
    /// A literal
    Literal(Literal),
}

impl Node {
    /// Build an IRI node without checking `iri`.
    pub fn iri<T: Into<Box<str>>>(iri: T) -> Self {
        Node::Iri(iri.into())
    }

    /// Build a plain literal (implicitly typed `xsd:string`).
    pub fn plain<T: Into<Box<str>>>(lexical: T) -> Self {
        Node::Literal(Literal::new(lexical, LiteralKind::Plain))
    }

    /// Build a language-tagged literal.
    pub fn lang<T: Into<Box<str>>>(lexical: T, tag: LanguageTag) -> Self {
        Node::Literal(Literal::new(lexical, LiteralKind::Lang(tag)))
    }

    /// Build a datatyped literal.
    ///
    /// `xsd:string` is normalized to [`LiteralKind::Plain`]
    /// and `rdf:langString` is kept as any other datatype,
    /// so that language and datatype are never both set.
    pub fn typed<T: Into<Box<str>>, U: Into<Box<str>>>(lexical: T, datatype: U) -> Self {
        let datatype = datatype.into();
        let kind = if &*datatype == xsd::string {
            LiteralKind::Plain
        } else {
            LiteralKind::Typed(datatype)
        };
        Node::Literal(Literal::new(lexical, kind))
    }

    /// The kind of this node.
    pub fn kind(&self) -> TermKind {
        match self {
            Node::Iri(_) => TermKind::Iri,
            Node::BlankNode(_) => TermKind::BlankNode,
            Node::Literal(_) => TermKind::Literal,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Node::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    /// The IRI of this node, if it is an IRI.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The identifier of this node, if it is a blank node.
    pub fn as_bnode_id(&self) -> Option<&BnodeId> {
        match self {
            Node::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    /// The literal value of this node, if it is a literal.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Literal> for Node {
    fn from(value: Literal) -> Self {
        Node::Literal(value)
    }
}

impl From<BnodeId> for Node {
    fn from(value: BnodeId) -> Self {
        Node::BlankNode(value)
    }
}

/// An RDF literal: a lexical form, with either a language tag, a datatype or neither.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct Literal {
    lexical: Box<str>,
    kind: LiteralKind,
}

/// What qualifies the lexical form of a [`Literal`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum LiteralKind {
    /// A simple literal, of type `xsd:string`
    Plain,
    /// A language-tagged string
    Lang(LanguageTag),
    /// A literal with an explicit datatype other than `xsd:string`
    Typed(Box<str>),
}

impl Literal {
    pub fn new<T: Into<Box<str>>>(lexical: T, kind: LiteralKind) -> Self {
        Literal {
            lexical: lexical.into(),
            kind,
        }
    }

    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }

    /// The language tag of this literal, if any.
    pub fn language_tag(&self) -> Option<&LanguageTag> {
        match &self.kind {
            LiteralKind::Lang(tag) => Some(tag),
            _ => None,
        }
    }

    /// The explicit datatype of this literal, if any.
    pub fn explicit_datatype(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Typed(dt) => Some(dt),
            _ => None,
        }
    }

    /// The datatype IRI of this literal, as defined by RDF 1.1.
    pub fn datatype(&self) -> &str {
        match &self.kind {
            LiteralKind::Plain => xsd::string,
            LiteralKind::Lang(_) => rdf::langString,
            LiteralKind::Typed(dt) => dt,
        }
    }
}
