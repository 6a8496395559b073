//! Parser for the [SPARQL 1.1 Query Results CSV Format](https://www.w3.org/TR/sparql11-results-csv-tsv/#csv).
//!
//! CSV loses the distinction between IRIs and literals,
//! so bare fields are classified heuristically:
//! a bare field is an IRI only if it starts with one of [`URI_PREFIXES`]
//! and is a valid absolute IRI; any other field is a plain literal.
use std::io::Read;
use tessera_api::handler::{run_results, NodeFactory, ParseOutcome, ResultsHandler};
use tessera_api::iri::is_absolute_iri;
use tessera_api::parser::ResultsParser;
use tessera_api::term::{BnodeId, Node};
use tessera_api::warning::WarningSink;
use tessera_io::encoding::check_encoding;
use tessera_io::ReaderOptions;

use crate::error::Error;
use crate::queue::TokenQueue;
use crate::tabular::{parse_tabular, Dialect};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

mod _tokenizer;
pub use _tokenizer::*;

/// The prefixes of bare fields that are considered as IRIs.
pub const URI_PREFIXES: [&str; 4] = ["http://", "https://", "mailto:", "ftp://"];

/// Whether a bare CSV field should be read as an IRI.
pub fn looks_like_uri(txt: &str) -> bool {
    URI_PREFIXES.iter().any(|p| txt.starts_with(p)) && is_absolute_iri(txt)
}

/// SPARQL CSV results parser.
///
/// A row ending right after a comma may omit its last field,
/// which is then unbound.
#[derive(Clone, Debug, Default)]
pub struct SparqlCsvParser {
    reader: ReaderOptions,
}

impl SparqlCsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the input is buffered.
    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }
}

impl<R: Read> ResultsParser<R> for SparqlCsvParser {
    type Error = Error;

    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, Error>
    where
        H: ResultsHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        run_results(handler, |handler| {
            let mut reader = self.reader.open(input)?;
            check_encoding(&mut reader, warnings)?;
            parse_tabular::<Csv, _, _, _>(CsvTokenizer::new(reader), handler, warnings)
        })
    }
}

tessera_api::def_mod_functions_for_read_parser!(SparqlCsvParser, ResultsParser, ResultsHandler);

pub(crate) struct Csv;

impl Dialect for Csv {
    const SEPARATOR: TokenKind = TokenKind::Comma;
    const TRAILING_EMPTY_TOLERATED: bool = true;

    fn header_name(token: &Token) -> Option<&str> {
        match token.kind {
            TokenKind::PlainLiteral | TokenKind::Literal => Some(&token.value),
            TokenKind::Variable => Some(&token.value[1..]),
            _ => None,
        }
    }

    fn is_term(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::PlainLiteral
                | TokenKind::Literal
                | TokenKind::LongLiteral
                | TokenKind::BlankNodeWithId
                | TokenKind::Variable
        )
    }

    fn make_term<T, F>(_queue: &mut TokenQueue<T>, token: Token, factory: &mut F) -> Result<Node, Error>
    where
        T: Tokenizer,
        F: NodeFactory + ?Sized,
    {
        match token.kind {
            TokenKind::PlainLiteral if looks_like_uri(&token.value) => {
                Ok(factory.create_uri_node(&token.value))
            }
            TokenKind::BlankNodeWithId => {
                let id = BnodeId::new(token.value.as_str())
                    .map_err(|e| Error::at_token(e.into(), &token))?;
                Ok(factory.create_blank_node(id))
            }
            // variables have no meaning in a data row, so their raw text is kept
            _ => Ok(factory.create_literal_node(&token.value)),
        }
    }
}
