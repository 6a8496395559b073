// this module is transparently re-exported by its parent `csv`
use tessera_api::term::BnodeId;
use tessera_io::CharSource;

use crate::error::{Error, ErrorKind};
use crate::token::{Token, TokenKind};
use crate::tokenizer::{Scanner, Tokenizer};

/// Tokenizer for the [SPARQL 1.1 CSV results format](https://www.w3.org/TR/sparql11-results-csv-tsv/#csv).
///
/// Fields are either quoted (with `""` escaping a quote) or bare;
/// bare fields are classified by their prefix (`_:`, `?`, `$`),
/// everything else is a [`TokenKind::PlainLiteral`].
pub struct CsvTokenizer<S> {
    scanner: Scanner<S>,
}

impl<S: CharSource> CsvTokenizer<S> {
    pub fn new(source: S) -> Self {
        CsvTokenizer {
            scanner: Scanner::new(source),
        }
    }

    fn quoted(&mut self) -> Result<Token, Error> {
        let start = self.scanner.position();
        self.scanner.next()?;
        let mut buf = vec![];
        let mut multiline = false;
        loop {
            match self.scanner.next()? {
                None => {
                    return Err(self
                        .scanner
                        .error_here(ErrorKind::UnexpectedEof("a quoted field")))
                }
                Some(b'"') => {
                    if self.scanner.peek()? == Some(b'"') {
                        self.scanner.next()?;
                        buf.push(b'"');
                    } else {
                        break;
                    }
                }
                Some(b) => {
                    multiline |= b == b'\n' || b == b'\r';
                    buf.push(b);
                }
            }
        }
        match self.scanner.peek()? {
            None | Some(b',' | b'\r' | b'\n') => (),
            Some(b) => {
                self.scanner.next()?;
                return Err(self.scanner.error_here(ErrorKind::UnexpectedChar(b as char)));
            }
        }
        let kind = if multiline {
            TokenKind::LongLiteral
        } else {
            TokenKind::Literal
        };
        let value = self.scanner.text(buf);
        Ok(Token::new(kind, value, self.scanner.span_from(start)))
    }

    fn bare(&mut self) -> Result<Token, Error> {
        let start = self.scanner.position();
        let mut buf = vec![];
        loop {
            match self.scanner.peek()? {
                None | Some(b',' | b'\r' | b'\n') => break,
                Some(b'"') => {
                    self.scanner.next()?;
                    return Err(self.scanner.error_here(ErrorKind::UnexpectedChar('"')));
                }
                Some(b) => {
                    self.scanner.next()?;
                    buf.push(b);
                }
            }
        }
        let value = self.scanner.text(buf);
        let span = self.scanner.span_from(start);
        let kind = match value.as_bytes() {
            [b'_', b':', ..] if BnodeId::new(&value[2..]).is_ok() => TokenKind::BlankNodeWithId,
            [b'?' | b'$', _, ..] => TokenKind::Variable,
            _ => TokenKind::PlainLiteral,
        };
        if kind == TokenKind::BlankNodeWithId {
            return Ok(Token::new(kind, &value[2..], span));
        }
        Ok(Token::new(kind, value, span))
    }
}

impl<S: CharSource> Tokenizer for CsvTokenizer<S> {
    fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(bof) = self.scanner.bof() {
            return Ok(bof);
        }
        match self.scanner.peek()? {
            None => Ok(self.scanner.eof()),
            Some(b',') => {
                let start = self.scanner.position();
                self.scanner.next()?;
                Ok(Token::new(TokenKind::Comma, ",", self.scanner.span_from(start)))
            }
            Some(b'\r' | b'\n') => self.scanner.eol(),
            Some(b'"') => self.quoted(),
            Some(_) => self.bare(),
        }
    }

    fn replaced_invalid_utf8(&self) -> bool {
        self.scanner.replaced_invalid_utf8()
    }
}
