//! Parser for the [SPARQL 1.1 Query Results TSV Format](https://www.w3.org/TR/sparql11-results-csv-tsv/#tsv).
//!
//! Unlike CSV, every column of a row must be explicit.
use lazy_static::lazy_static;
use regex::Regex;
use std::io::Read;
use tessera_api::handler::{run_results, NodeFactory, ParseOutcome, ResultsHandler};
use tessera_api::iri::check_absolute_iri;
use tessera_api::ns::xsd;
use tessera_api::parser::ResultsParser;
use tessera_api::term::{BnodeId, LanguageTag, Node};
use tessera_api::warning::WarningSink;
use tessera_io::encoding::check_encoding;
use tessera_io::ReaderOptions;

use crate::error::{Error, ErrorKind};
use crate::queue::TokenQueue;
use crate::tabular::{parse_tabular, Dialect};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

mod _tokenizer;
pub use _tokenizer::*;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?[0-9]*\.[0-9]+$").unwrap();
    static ref DOUBLE: Regex =
        Regex::new(r"^[+-]?([0-9]+\.[0-9]*|\.?[0-9]+)[eE][+-]?[0-9]+$").unwrap();
}

/// The datatype of a bare TSV word, following the Turtle abbreviations.
pub fn plain_literal_datatype(txt: &str) -> Option<&'static str> {
    if txt == "true" || txt == "false" {
        Some(xsd::boolean)
    } else if INTEGER.is_match(txt) {
        Some(xsd::integer)
    } else if DECIMAL.is_match(txt) {
        Some(xsd::decimal)
    } else if DOUBLE.is_match(txt) {
        Some(xsd::double)
    } else {
        None
    }
}

/// SPARQL TSV results parser.
#[derive(Clone, Debug, Default)]
pub struct SparqlTsvParser {
    reader: ReaderOptions,
}

impl SparqlTsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the input is buffered.
    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }
}

impl<R: Read> ResultsParser<R> for SparqlTsvParser {
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
            parse_tabular::<Tsv, _, _, _>(TsvTokenizer::new(reader), handler, warnings)
        })
    }
}

tessera_api::def_mod_functions_for_read_parser!(SparqlTsvParser, ResultsParser, ResultsHandler);

pub(crate) struct Tsv;

impl Dialect for Tsv {
    const SEPARATOR: TokenKind = TokenKind::Tab;
    const TRAILING_EMPTY_TOLERATED: bool = false;

    fn header_name(token: &Token) -> Option<&str> {
        match token.kind {
            TokenKind::Variable => Some(&token.value[1..]),
            TokenKind::PlainLiteral => Some(&token.value),
            _ => None,
        }
    }

    fn is_term(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Uri
                | TokenKind::Literal
                | TokenKind::LongLiteral
                | TokenKind::PlainLiteral
                | TokenKind::BlankNodeWithId
        )
    }

    fn make_term<T, F>(queue: &mut TokenQueue<T>, token: Token, factory: &mut F) -> Result<Node, Error>
    where
        T: Tokenizer,
        F: NodeFactory + ?Sized,
    {
        match token.kind {
            TokenKind::Uri => {
                check_absolute_iri(&token.value).map_err(|e| Error::at_token(e.into(), &token))?;
                Ok(factory.create_uri_node(&token.value))
            }
            TokenKind::BlankNodeWithId => {
                let id = BnodeId::new(token.value.as_str())
                    .map_err(|e| Error::at_token(e.into(), &token))?;
                Ok(factory.create_blank_node(id))
            }
            TokenKind::PlainLiteral => match plain_literal_datatype(&token.value) {
                Some(dt) => Ok(factory.create_typed_literal_node(&token.value, dt)),
                None => Err(Error::at_token(
                    ErrorKind::InvalidPlainLiteral(token.value.clone()),
                    &token,
                )),
            },
            _ => match queue.peek().map(|t| t.kind)? {
                TokenKind::LangSpec => {
                    let suffix = queue.dequeue()?;
                    let tag = LanguageTag::new(suffix.value.as_str())
                        .map_err(|e| Error::at_token(e.into(), &suffix))?;
                    Ok(factory.create_lang_literal_node(&token.value, tag))
                }
                TokenKind::DataType => {
                    let suffix = queue.dequeue()?;
                    check_absolute_iri(&suffix.value)
                        .map_err(|e| Error::at_token(e.into(), &suffix))?;
                    Ok(factory.create_typed_literal_node(&token.value, &suffix.value))
                }
                _ => Ok(factory.create_literal_node(&token.value)),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tessera_api::handler::{ResultSet, StopAfter};
    use tessera_api::parser::WithLocation;
    use test_case::test_case;

    fn parse(txt: &str) -> Result<ResultSet, Error> {
        crate::test_setup();
        let mut rs = ResultSet::new();
        load_str(&mut rs, txt)?;
        Ok(rs)
    }

    #[test]
    fn simple_row() {
        let rs = parse("?s\t?p\t?o\n<http://a>\t<http://b>\t\"lit\"\n").unwrap();
        assert_eq!(rs.bindings.len(), 1);
        let b = &rs.bindings[0];
        assert_eq!(b.get("s"), Some(&Node::iri("http://a")));
        assert_eq!(b.get("p"), Some(&Node::iri("http://b")));
        assert_eq!(b.get("o"), Some(&Node::plain("lit")));
    }

    #[test]
    fn too_few_terms() {
        let err = parse("?x\t?y\n1\n").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::TooFewTerms {
                expected: 2,
                found: 1
            }
        ));
        assert_eq!(err.location().line(), Some(2));
    }

    #[test]
    fn trailing_empty_column_is_not_tolerated() {
        let err = parse("?x\t?y\n1\t\n").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TooFewTerms { .. }));
    }

    #[test]
    fn embedded_empty_column() {
        let rs = parse("?x\t?y\t?z\n1\t\t2\n").unwrap();
        assert_eq!(rs.bindings[0].get("y"), None);
        assert_eq!(rs.bindings[0].get("z"), Some(&Node::typed("2", xsd::integer)));
    }

    #[test]
    fn lang_and_datatype() {
        let rs = parse(
            "?a\t?b\n\"chat\"@fr\t\"2020\"^^<http://www.w3.org/2001/XMLSchema#gYear>\n",
        )
        .unwrap();
        let b = &rs.bindings[0];
        assert_eq!(
            b.get("a"),
            Some(&Node::lang("chat", LanguageTag::new("fr").unwrap()))
        );
        assert_eq!(
            b.get("b"),
            Some(&Node::typed("2020", "http://www.w3.org/2001/XMLSchema#gYear"))
        );
    }

    #[test_case("42", Some(xsd::integer))]
    #[test_case("-42", Some(xsd::integer))]
    #[test_case("4.2", Some(xsd::decimal))]
    #[test_case(".5", Some(xsd::decimal))]
    #[test_case("4.2E1", Some(xsd::double))]
    #[test_case("1e-3", Some(xsd::double))]
    #[test_case("true", Some(xsd::boolean))]
    #[test_case("True", None)]
    #[test_case("abc", None)]
    fn plain_literals(txt: &str, expected: Option<&str>) {
        assert_eq!(plain_literal_datatype(txt), expected);
    }

    #[test]
    fn unrecognized_plain_literal() {
        let err = parse("?x\nhello\n").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidPlainLiteral(_)));
    }

    #[test]
    fn relative_iri() {
        let err = parse("?x\n<foo>\n").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidIri(_)));
    }

    #[test]
    fn bad_language_tag() {
        let err = parse("?x\n\"a\"@-x\n").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidLanguageTag(_)));
    }

    #[test]
    fn orphan_lang_spec() {
        let err = parse("?x\n@en\n").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Unexpected {
                found: TokenKind::LangSpec,
                ..
            }
        ));
    }

    #[test]
    fn blank_nodes_and_long_literal() {
        let rs = parse("?x\t?y\n_:b0\t\"\"\"multi\nline\"\"\"\n").unwrap();
        let b = &rs.bindings[0];
        assert_eq!(b.get("x"), Some(&Node::from(BnodeId::new("b0").unwrap())));
        assert_eq!(b.get("y"), Some(&Node::plain("multi\nline")));
    }

    #[test]
    fn variable_in_row() {
        assert!(parse("?x\n?y\n").is_err());
    }

    #[test]
    fn zero_variables() {
        let rs = parse("\n\n").unwrap();
        assert!(rs.variables.is_empty());
        assert_eq!(rs.bindings.len(), 1);
        assert!(rs.bindings[0].is_empty());
    }

    #[test]
    fn stop_on_variable() {
        struct NoVars;
        impl NodeFactory for NoVars {}
        impl ResultsHandler for NoVars {
            fn handle_boolean_result(&mut self, _value: bool) {}
            fn handle_variable(&mut self, _name: &str) -> bool {
                false
            }
            fn handle_result(&mut self, _binding: tessera_api::binding::ResultBinding) -> bool {
                panic!("no result expected")
            }
        }
        let outcome = load_str(&mut NoVars, "?x\n1\n").unwrap();
        assert_eq!(outcome, ParseOutcome::StoppedByHandler);
    }

    #[test]
    fn stop_after_two() {
        let mut h = StopAfter::new(ResultSet::new(), 2);
        let outcome = load_str(&mut h, "?x\n1\n2\n3\n4\n").unwrap();
        assert_eq!(outcome, ParseOutcome::StoppedByHandler);
        assert_eq!(h.inner().bindings.len(), 2);
        assert_eq!(h.end_calls(), 1);
    }

    #[test]
    fn round_trip() {
        let rows = [
            ("<http://ex.org/a>", Node::iri("http://ex.org/a")),
            ("\"x\\ty\"", Node::plain("x\ty")),
            ("\"hi\"@en", Node::lang("hi", LanguageTag::new("en").unwrap())),
            ("12", Node::typed("12", xsd::integer)),
            ("_:n1", Node::from(BnodeId::new("n1").unwrap())),
        ];
        let mut txt = String::from("?v\n");
        for (src, _) in rows.iter() {
            txt.push_str(src);
            txt.push('\n');
        }
        let rs = parse(&txt).unwrap();
        let got: Vec<_> = rs.bindings.iter().map(|b| b.get("v").cloned()).collect();
        let exp: Vec<_> = rows.into_iter().map(|(_, n)| Some(n)).collect();
        assert_eq!(got, exp);
    }

    #[test_case("?x\t?\n"; "lone question mark")]
    #[test_case("$\n"; "lone dollar")]
    fn variable_without_name(src: &str) {
        let err = parse(src).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EmptyVariableName));
        assert_eq!(err.location().line(), Some(1));
    }
}
