//! Errors raised by the TriX parser.
use std::io;
use tessera_api::iri::InvalidIri;
use tessera_api::parser::{Location, WithLocation};
use tessera_api::term::language_tag::InvalidLanguageTag;
use tessera_api::triple::InvalidTriple;
use tessera_io::ReaderError;
use thiserror::Error;

/// A TriX parse error.
///
/// It carries the byte offset where it was detected,
/// and the start tag of the last element read, for diagnostics.
#[derive(Debug, Error)]
#[error("{kind} at byte {offset} (last element read: {snippet})")]
pub struct TrixError {
    kind: TrixErrorKind,
    offset: usize,
    snippet: String,
}

impl TrixError {
    pub fn new(kind: TrixErrorKind, offset: usize, snippet: String) -> Self {
        TrixError {
            kind,
            offset,
            snippet,
        }
    }

    pub fn kind(&self) -> &TrixErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> TrixErrorKind {
        self.kind
    }

    /// The byte offset at which the error was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The start tag of the last element read before the error.
    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

impl WithLocation for TrixError {
    fn location(&self) -> Location {
        Location::from_offset(self.offset)
    }
}

impl From<io::Error> for TrixError {
    fn from(value: io::Error) -> Self {
        TrixError::new(value.into(), 0, String::new())
    }
}

impl From<ReaderError> for TrixError {
    fn from(value: ReaderError) -> Self {
        TrixError::new(value.into(), 0, String::new())
    }
}

/// The different kinds of TriX errors.
#[derive(Debug, Error)]
pub enum TrixErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Reader(#[from] ReaderError),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Expected the document element to be <TriX>, found <{0}>")]
    NotTrix(String),
    #[error("The <TriX> element must have an xmlns attribute set to the TriX namespace")]
    MissingNamespace,
    #[error("The xmlns attribute of the <TriX> element must be the TriX namespace, found {0:?}")]
    RootNamespace(String),
    #[error("Element <{0}> is not in the TriX namespace")]
    ForeignElement(String),
    #[error("Unexpected element <{found}>, expected {expected}")]
    UnexpectedElement {
        found: String,
        expected: &'static str,
    },
    #[error("Unexpected text {0:?}")]
    UnexpectedText(String),
    #[error("Unexpected end of element, expected {0}")]
    UnexpectedEnd(&'static str),
    #[error("Unexpected end of document")]
    UnexpectedEof,
    #[error("<typedLiteral> element does not have the required datatype attribute")]
    MissingDatatype,
    #[error("Blank node names for graphs are not supported")]
    GraphId,
    #[error(transparent)]
    InvalidIri(#[from] InvalidIri),
    #[error(transparent)]
    InvalidLanguageTag(#[from] InvalidLanguageTag),
    #[error(transparent)]
    InvalidTriple(#[from] InvalidTriple),
}
