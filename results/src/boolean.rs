//! Parser for boolean results in plain text: the whole input is `true` or `false`.
use std::io::Read;
use std::ops::ControlFlow;
use tessera_api::handler::{run_results, ParseOutcome, ResultsHandler};
use tessera_api::parser::{Location, ResultsParser};
use tessera_api::warning::WarningSink;
use tessera_io::encoding::{check_encoding, decode_lossy};
use tessera_io::ReaderOptions;

use crate::error::{Error, ErrorKind};

/// Boolean results parser.
///
/// Surrounding whitespace is ignored and the value is case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct SparqlBooleanParser {
    reader: ReaderOptions,
}

impl SparqlBooleanParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the input is buffered.
    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }
}

impl<R: Read> ResultsParser<R> for SparqlBooleanParser {
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
            let mut bytes = vec![];
            reader.read_to_end(&mut bytes)?;
            let (txt, replaced) = decode_lossy(bytes);
            if replaced {
                warnings.warn("Input is not valid UTF-8; invalid sequences were replaced by U+FFFD");
            }
            let value = parse_boolean(&txt)?;
            handler.handle_boolean_result(value);
            Ok(ControlFlow::Continue(()))
        })
    }
}

tessera_api::def_mod_functions_for_read_parser!(SparqlBooleanParser, ResultsParser, ResultsHandler);

fn parse_boolean(txt: &str) -> Result<bool, Error> {
    let trimmed = txt.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        let mut excerpt: String = trimmed.chars().take(32).collect();
        if excerpt.len() < trimmed.len() {
            excerpt.push('…');
        }
        Err(Error::new(
            ErrorKind::InvalidBoolean(excerpt),
            Location::from_offset(0),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tessera_api::handler::ResultSet;
    use test_case::test_case;

    #[test_case("true", true)]
    #[test_case("false", false)]
    #[test_case("  TRUE\n", true; "whitespace and case")]
    #[test_case("\u{feff}false", false; "bom")]
    fn valid(txt: &str, expected: bool) {
        let mut rs = ResultSet::new();
        let outcome = load_str(&mut rs, txt).unwrap();
        assert_eq!(outcome, ParseOutcome::Completed);
        assert_eq!(rs.boolean, Some(expected));
        assert!(rs.bindings.is_empty());
    }

    #[test_case(""; "empty")]
    #[test_case("yes"; "yes")]
    #[test_case("true false"; "two values")]
    fn invalid(txt: &str) {
        let mut rs = ResultSet::new();
        let err = load_str(&mut rs, txt).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidBoolean(_)));
        assert_eq!(rs.boolean, None);
    }

    #[test]
    fn handled_exactly_once() {
        struct Count(usize);
        impl tessera_api::handler::NodeFactory for Count {}
        impl ResultsHandler for Count {
            fn handle_boolean_result(&mut self, _value: bool) {
                self.0 += 1;
            }
            fn handle_result(&mut self, _binding: tessera_api::binding::ResultBinding) -> bool {
                true
            }
        }
        let mut h = Count(0);
        load_str(&mut h, "true").unwrap();
        assert_eq!(h.0, 1);
    }
}
