//! The [`Tokenizer`] trait, and the [`Scanner`] shared by its implementations.
//!
//! Concrete tokenizers live in [`csv`](crate::csv) and [`tsv`](crate::tsv).
use tessera_api::parser::Location;
use tessera_io::encoding::decode_lossy;
use tessera_io::CharSource;

use crate::error::{Error, ErrorKind};
use crate::token::{Span, Token, TokenKind};

/// A lazy, forward-only producer of [`Token`]s.
///
/// The first token is always [`TokenKind::Bof`];
/// once the input is exhausted, every call returns [`TokenKind::Eof`].
pub trait Tokenizer {
    fn next_token(&mut self) -> Result<Token, Error>;

    /// Whether invalid UTF-8 was replaced in any token so far.
    fn replaced_invalid_utf8(&self) -> bool {
        false
    }
}

/// Reads bytes from a [`CharSource`] while tracking line and column.
///
/// Columns count characters, not bytes.
/// `\r\n`, `\r` and `\n` each end one line.
pub struct Scanner<S> {
    source: S,
    line: usize,
    col: usize,
    last: (usize, usize),
    bof_done: bool,
    lossy: bool,
}

impl<S: CharSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Scanner {
            source,
            line: 1,
            col: 1,
            last: (1, 1),
            bof_done: false,
            lossy: false,
        }
    }

    /// The position of the next character.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    /// The position of the last consumed character.
    pub fn last_position(&self) -> (usize, usize) {
        self.last
    }

    /// A span from `start` to the last consumed character.
    pub fn span_from(&self, start: (usize, usize)) -> Span {
        Span::new(start, self.last)
    }

    pub fn peek(&mut self) -> Result<Option<u8>, Error> {
        self.source.peek_byte().map_err(|e| self.io_error(e))
    }

    pub fn next(&mut self) -> Result<Option<u8>, Error> {
        let b = self.source.read_byte().map_err(|e| self.io_error(e))?;
        if let Some(b) = b {
            // UTF-8 continuation bytes do not start a new character
            let continuation = b & 0xC0 == 0x80;
            if !continuation {
                self.last = (self.line, self.col);
            }
            match b {
                b'\n' => self.new_line(),
                b'\r' => {
                    if self.peek()? == Some(b'\n') {
                        self.col += 1;
                    } else {
                        self.new_line();
                    }
                }
                _ if continuation => {}
                _ => self.col += 1,
            }
        }
        Ok(b)
    }

    /// Consume the next byte, which must be `expected`.
    pub fn expect(&mut self, expected: u8, context: &'static str) -> Result<(), Error> {
        match self.next()? {
            Some(b) if b == expected => Ok(()),
            Some(b) => Err(self.error_here(ErrorKind::UnexpectedChar(b as char))),
            None => Err(self.error_here(ErrorKind::UnexpectedEof(context))),
        }
    }

    /// The synthetic BOF token, the first time it is called.
    pub fn bof(&mut self) -> Option<Token> {
        if self.bof_done {
            None
        } else {
            self.bof_done = true;
            Some(Token::new(TokenKind::Bof, "", Span::new((1, 1), (1, 1))))
        }
    }

    pub fn eof(&self) -> Token {
        let pos = self.position();
        Token::new(TokenKind::Eof, "", Span::new(pos, pos))
    }

    /// Decode the bytes of a token, replacing invalid UTF-8.
    pub fn text(&mut self, bytes: Vec<u8>) -> String {
        let (txt, replaced) = decode_lossy(bytes);
        self.lossy |= replaced;
        txt
    }

    pub fn replaced_invalid_utf8(&self) -> bool {
        self.lossy
    }

    /// An error located at the last consumed character.
    pub fn error_here(&self, kind: ErrorKind) -> Error {
        Error::new(kind, Location::from_lico(self.last.0, self.last.1))
    }

    /// Consume an end of line (`\r\n`, `\r` or `\n`) and return it as an EOL token.
    ///
    /// Must be called when the next byte is `\r` or `\n`.
    pub fn eol(&mut self) -> Result<Token, Error> {
        let start = self.position();
        if self.next()? == Some(b'\r') && self.peek()? == Some(b'\n') {
            self.next()?;
        }
        Ok(Token::new(TokenKind::Eol, "\n", self.span_from(start)))
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.col = 1;
    }

    fn io_error(&self, err: std::io::Error) -> Error {
        Error::new(ErrorKind::Io(err), Location::from_lico(self.line, self.col))
    }
}

/// Read the hexadecimal digits of a `\u` (`len` = 4) or `\U` (`len` = 8) escape sequence
/// and push the corresponding UTF-8 bytes to `buf`.
pub(crate) fn read_unicode_escape<S: CharSource>(
    scanner: &mut Scanner<S>,
    len: usize,
    buf: &mut Vec<u8>,
) -> Result<(), Error> {
    let mut hex = String::with_capacity(len);
    for _ in 0..len {
        match scanner.next()? {
            Some(b) if b.is_ascii_hexdigit() => hex.push(b as char),
            _ => {
                return Err(scanner.error_here(ErrorKind::InvalidEscape(format!("\\u{}", hex))));
            }
        }
    }
    let c = u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| scanner.error_here(ErrorKind::InvalidEscape(format!("\\u{}", hex))))?;
    let mut utf8 = [0; 4];
    buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use tessera_io::{ReaderOptions, SourceKind};

    fn scanner(txt: &str) -> Scanner<impl CharSource + '_> {
        let reader = ReaderOptions::new()
            .with_kind(SourceKind::Memory)
            .with_buffer_size(3)
            .open(txt.as_bytes())
            .unwrap();
        Scanner::new(reader)
    }

    #[test]
    fn positions() {
        let mut s = scanner("ab\ncé\r\nd\re");
        let mut seen = vec![];
        while let Some(b) = s.next().unwrap() {
            if b & 0xC0 != 0x80 {
                seen.push((b as char, s.last_position()));
            }
        }
        assert_eq!(
            seen,
            [
                ('a', (1, 1)),
                ('b', (1, 2)),
                ('\n', (1, 3)),
                ('c', (2, 1)),
                ('\u{c3}', (2, 2)),
                ('\r', (2, 3)),
                ('\n', (2, 4)),
                ('d', (3, 1)),
                ('\r', (3, 2)),
                ('e', (4, 1)),
            ]
        );
    }

    #[test]
    fn bof_once() {
        let mut s = scanner("");
        assert_eq!(s.bof().unwrap().kind, TokenKind::Bof);
        assert!(s.bof().is_none());
    }

    #[test]
    fn unicode_escape() {
        let mut s = scanner("00e9!");
        let mut buf = vec![];
        read_unicode_escape(&mut s, 4, &mut buf).unwrap();
        assert_eq!(buf, "é".as_bytes());
    }

    #[test]
    fn bad_unicode_escape() {
        let mut s = scanner("00g9");
        let mut buf = vec![];
        let err = read_unicode_escape(&mut s, 4, &mut buf).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidEscape(_)));
    }
}
