// this module is transparently re-exported by its parent `tsv`
use tessera_io::CharSource;

use crate::error::{Error, ErrorKind};
use crate::token::{Token, TokenKind};
use crate::tokenizer::{read_unicode_escape, Scanner, Tokenizer};

/// Tokenizer for the [SPARQL 1.1 TSV results format](https://www.w3.org/TR/sparql11-results-csv-tsv/#tsv).
///
/// Terms are written in the Turtle/N-Triples syntax.
/// Spaces between tokens are skipped.
pub struct TsvTokenizer<S> {
    scanner: Scanner<S>,
}

impl<S: CharSource> TsvTokenizer<S> {
    pub fn new(source: S) -> Self {
        TsvTokenizer {
            scanner: Scanner::new(source),
        }
    }

    fn skip_spaces(&mut self) -> Result<(), Error> {
        while self.scanner.peek()? == Some(b' ') {
            self.scanner.next()?;
        }
        Ok(())
    }

    /// Read `<...>`, the opening `<` being the next byte.
    fn iri(&mut self) -> Result<String, Error> {
        self.scanner.expect(b'<', "an IRI")?;
        let mut buf = vec![];
        loop {
            match self.scanner.next()? {
                Some(b'>') => break,
                Some(b'\\') => match self.scanner.next()? {
                    Some(b'u') => read_unicode_escape(&mut self.scanner, 4, &mut buf)?,
                    Some(b'U') => read_unicode_escape(&mut self.scanner, 8, &mut buf)?,
                    other => return Err(self.invalid_escape(other)),
                },
                Some(b @ (b'\n' | b'\r' | b'\t' | b' ' | b'<' | b'"')) => {
                    return Err(self.scanner.error_here(ErrorKind::UnexpectedChar(b as char)))
                }
                Some(b) => buf.push(b),
                None => return Err(self.scanner.error_here(ErrorKind::UnexpectedEof("an IRI"))),
            }
        }
        Ok(self.scanner.text(buf))
    }

    fn quoted(&mut self) -> Result<Token, Error> {
        let start = self.scanner.position();
        let Some(quote) = self.scanner.next()? else {
            return Err(self.scanner.error_here(ErrorKind::UnexpectedEof("a literal")));
        };
        let long = if self.scanner.peek()? == Some(quote) {
            self.scanner.next()?;
            if self.scanner.peek()? != Some(quote) {
                // empty short literal
                return Ok(Token::new(TokenKind::Literal, "", self.scanner.span_from(start)));
            }
            self.scanner.next()?;
            true
        } else {
            false
        };
        let mut buf = vec![];
        loop {
            match self.scanner.next()? {
                None => return Err(self.scanner.error_here(ErrorKind::UnexpectedEof("a literal"))),
                Some(b) if b == quote => {
                    if !long {
                        break;
                    }
                    if self.scanner.peek()? != Some(quote) {
                        buf.push(quote);
                        continue;
                    }
                    self.scanner.next()?;
                    if self.scanner.peek()? != Some(quote) {
                        buf.extend([quote, quote]);
                        continue;
                    }
                    self.scanner.next()?;
                    break;
                }
                Some(b'\\') => self.escape(&mut buf)?,
                Some(b @ (b'\n' | b'\r')) if !long => {
                    return Err(self.scanner.error_here(ErrorKind::UnexpectedChar(b as char)))
                }
                Some(b) => buf.push(b),
            }
        }
        let kind = if long {
            TokenKind::LongLiteral
        } else {
            TokenKind::Literal
        };
        let value = self.scanner.text(buf);
        Ok(Token::new(kind, value, self.scanner.span_from(start)))
    }

    fn escape(&mut self, buf: &mut Vec<u8>) -> Result<(), Error> {
        let c = match self.scanner.next()? {
            Some(b't') => b'\t',
            Some(b'b') => 0x08,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b'f') => 0x0C,
            Some(b @ (b'"' | b'\'' | b'\\')) => b,
            Some(b'u') => return read_unicode_escape(&mut self.scanner, 4, buf),
            Some(b'U') => return read_unicode_escape(&mut self.scanner, 8, buf),
            other => return Err(self.invalid_escape(other)),
        };
        buf.push(c);
        Ok(())
    }

    fn invalid_escape(&self, found: Option<u8>) -> Error {
        let seq = match found {
            Some(b) => format!("\\{}", b as char),
            None => "\\".to_string(),
        };
        self.scanner.error_here(ErrorKind::InvalidEscape(seq))
    }

    /// Read bytes up to the next delimiter (space, tab, end of line or end of input).
    fn word(&mut self) -> Result<String, Error> {
        let mut buf = vec![];
        while let Some(b) = self.scanner.peek()? {
            if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
                break;
            }
            self.scanner.next()?;
            buf.push(b);
        }
        Ok(self.scanner.text(buf))
    }

    fn lang_spec(&mut self) -> Result<String, Error> {
        self.scanner.expect(b'@', "a language tag")?;
        let mut buf = vec![];
        while let Some(b) = self.scanner.peek()? {
            if !(b.is_ascii_alphanumeric() || b == b'-') {
                break;
            }
            self.scanner.next()?;
            buf.push(b);
        }
        Ok(self.scanner.text(buf))
    }
}

impl<S: CharSource> Tokenizer for TsvTokenizer<S> {
    fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(bof) = self.scanner.bof() {
            return Ok(bof);
        }
        self.skip_spaces()?;
        let start = self.scanner.position();
        let (kind, value) = match self.scanner.peek()? {
            None => return Ok(self.scanner.eof()),
            Some(b'\r' | b'\n') => return self.scanner.eol(),
            Some(b'"' | b'\'') => return self.quoted(),
            Some(b'\t') => {
                self.scanner.next()?;
                (TokenKind::Tab, "\t".to_string())
            }
            Some(b'<') => (TokenKind::Uri, self.iri()?),
            Some(b'@') => (TokenKind::LangSpec, self.lang_spec()?),
            Some(b'^') => {
                self.scanner.next()?;
                self.scanner.expect(b'^', "a datatype")?;
                (TokenKind::DataType, self.iri()?)
            }
            Some(b'_') => {
                self.scanner.next()?;
                self.scanner.expect(b':', "a blank node")?;
                (TokenKind::BlankNodeWithId, self.word()?)
            }
            Some(b'?' | b'$') => (TokenKind::Variable, self.word()?),
            Some(_) => (TokenKind::PlainLiteral, self.word()?),
        };
        Ok(Token::new(kind, value, self.scanner.span_from(start)))
    }

    fn replaced_invalid_utf8(&self) -> bool {
        self.scanner.replaced_invalid_utf8()
    }
}
