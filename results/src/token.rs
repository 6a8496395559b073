//! Lexical tokens produced by the [tokenizers](crate::tokenizer).
use std::fmt;
use tessera_api::parser::Location;

/// The closed set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Synthetic start of input
    Bof,
    /// Synthetic end of input
    Eof,
    Eol,
    Comma,
    Tab,
    Uri,
    Literal,
    /// A literal spanning several lines, or using triple quotes
    LongLiteral,
    /// A bare word
    PlainLiteral,
    BlankNodeWithId,
    Variable,
    /// The `^^<iri>` suffix of a literal
    DataType,
    /// The `@tag` suffix of a literal
    LangSpec,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Bof => "BOF",
            TokenKind::Eof => "EOF",
            TokenKind::Eol => "EOL",
            TokenKind::Comma => "COMMA",
            TokenKind::Tab => "TAB",
            TokenKind::Uri => "URI",
            TokenKind::Literal => "LITERAL",
            TokenKind::LongLiteral => "LONGLITERAL",
            TokenKind::PlainLiteral => "PLAINLITERAL",
            TokenKind::BlankNodeWithId => "BLANKNODEWITHID",
            TokenKind::Variable => "VARIABLE",
            TokenKind::DataType => "DATATYPE",
            TokenKind::LangSpec => "LANGSPEC",
        };
        f.write_str(name)
    }
}

/// The region of the input a token was read from.
///
/// Lines and columns start at 1; the end is the position of the last character of the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        Span {
            start_line: start.0,
            start_col: start.1,
            end_line: end.0,
            end_col: end.1,
        }
    }

    pub fn location(&self) -> Location {
        Location::from_licos(self.start_line, self.start_col, self.end_line, self.end_col)
    }
}

/// A lexical token.
///
/// `value` is the processed text of the token
/// (e.g. the content of a quoted literal, with escape sequences resolved).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new<T: Into<String>>(kind: TokenKind, value: T, span: Span) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
        }
    }
}
