//! Errors raised by the parsers of this crate.
use std::io;
use tessera_api::iri::InvalidIri;
use tessera_api::parser::{Location, WithLocation};
use tessera_api::term::bnode_id::InvalidBnodeId;
use tessera_api::term::language_tag::InvalidLanguageTag;
use tessera_io::ReaderError;
use thiserror::Error;

use crate::token::{Token, TokenKind};

/// A parse error, with the location where it was detected.
#[derive(Debug, Error)]
#[error("{kind} at {location}")]
pub struct Error {
    kind: ErrorKind,
    location: Location,
}

impl Error {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        Error { kind, location }
    }

    /// An error located on `token`.
    pub fn at_token(kind: ErrorKind, token: &Token) -> Self {
        Error::new(kind, token.span.location())
    }

    /// An unexpected `token`, where `expected` was expected.
    pub fn unexpected(token: &Token, expected: &'static str) -> Self {
        Error::at_token(
            ErrorKind::Unexpected {
                found: token.kind,
                expected,
            },
            token,
        )
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

impl WithLocation for Error {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::new(ErrorKind::Io(value), Location::Unknown)
    }
}

impl From<ReaderError> for Error {
    fn from(value: ReaderError) -> Self {
        Error::new(ErrorKind::Reader(value), Location::Unknown)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error::new(ErrorKind::Xml(value), Location::Unknown)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        let location = Location::from_lico(value.line(), value.column());
        Error::new(ErrorKind::Json(value), location)
    }
}

/// The different kinds of errors.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Reader(#[from] ReaderError),
    #[error("Unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("Unexpected end of input in {0}")]
    UnexpectedEof(&'static str),
    #[error("Unexpected {found} token, expected {expected}")]
    Unexpected {
        found: TokenKind,
        expected: &'static str,
    },
    #[error("Invalid escape sequence {0:?}")]
    InvalidEscape(String),
    #[error(transparent)]
    InvalidBnodeId(#[from] InvalidBnodeId),
    #[error(transparent)]
    InvalidLanguageTag(#[from] InvalidLanguageTag),
    #[error(transparent)]
    InvalidIri(#[from] InvalidIri),
    #[error("Unrecognized plain literal {0:?}")]
    InvalidPlainLiteral(String),
    #[error("Variable without a name")]
    EmptyVariableName,
    #[error("Variable {0:?} is declared more than once")]
    DuplicateVariable(String),
    #[error("Too many terms in row: the header declares {expected} variables")]
    TooManyTerms { expected: usize },
    #[error("Too few terms in row: the header declares {expected} variables, found {found}")]
    TooFewTerms { expected: usize, found: usize },
    #[error("Invalid boolean result {0:?}")]
    InvalidBoolean(String),
    #[error("Lookahead of {0} tokens exceeds the size of the queue")]
    LookaheadExceeded(usize),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("SPARQL XML results: {0}")]
    SparqlXml(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("SPARQL JSON results: {0}")]
    SparqlJson(String),
}
