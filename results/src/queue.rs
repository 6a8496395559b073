//! A bounded lookahead queue over a [`Tokenizer`].
use std::collections::VecDeque;
use tessera_api::parser::Location;

use crate::error::{Error, ErrorKind};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// Decouples the production of tokens from their consumption.
///
/// Peeking only pulls from the tokenizer as many tokens as required
/// to answer the query, and never more than `lookahead` tokens ahead.
pub struct TokenQueue<T> {
    tokenizer: T,
    buffer: VecDeque<Token>,
    lookahead: usize,
    last_kind: Option<TokenKind>,
}

impl<T: Tokenizer> TokenQueue<T> {
    /// Wrap `tokenizer`, allowing to peek up to `lookahead` tokens (at least 1).
    pub fn new(tokenizer: T, lookahead: usize) -> Self {
        let lookahead = lookahead.max(1);
        TokenQueue {
            tokenizer,
            buffer: VecDeque::with_capacity(lookahead),
            lookahead,
            last_kind: None,
        }
    }

    /// The next token, without consuming it.
    pub fn peek(&mut self) -> Result<&Token, Error> {
        self.peek_nth(0)
    }

    /// The `n`-th next token (starting at 0), without consuming anything.
    pub fn peek_nth(&mut self, n: usize) -> Result<&Token, Error> {
        if n >= self.lookahead {
            return Err(Error::new(
                ErrorKind::LookaheadExceeded(n + 1),
                Location::Unknown,
            ));
        }
        while self.buffer.len() <= n {
            let token = self.tokenizer.next_token()?;
            self.buffer.push_back(token);
        }
        Ok(&self.buffer[n])
    }

    /// Consume and return the next token.
    pub fn dequeue(&mut self) -> Result<Token, Error> {
        let token = match self.buffer.pop_front() {
            Some(token) => token,
            None => self.tokenizer.next_token()?,
        };
        log::trace!("dequeued {} {:?}", token.kind, token.value);
        self.last_kind = Some(token.kind);
        Ok(token)
    }

    /// The kind of the last dequeued token, if any.
    pub fn last_token_kind(&self) -> Option<TokenKind> {
        self.last_kind
    }

    /// The number of tokens currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::Span;

    /// Produces BOF, then `count` plain literals, then EOF forever.
    struct Counting {
        produced: usize,
        count: usize,
    }

    impl Tokenizer for Counting {
        fn next_token(&mut self) -> Result<Token, Error> {
            let span = Span::new((1, 1), (1, 1));
            let kind = match self.produced {
                0 => TokenKind::Bof,
                n if n <= self.count => TokenKind::PlainLiteral,
                _ => TokenKind::Eof,
            };
            let token = Token::new(kind, self.produced.to_string(), span);
            self.produced += 1;
            Ok(token)
        }
    }

    fn queue(count: usize, lookahead: usize) -> TokenQueue<Counting> {
        TokenQueue::new(Counting { produced: 0, count }, lookahead)
    }

    #[test]
    fn peek_is_lazy() {
        let mut q = queue(5, 3);
        assert_eq!(q.tokenizer().produced, 0);
        assert_eq!(q.peek().unwrap().kind, TokenKind::Bof);
        assert_eq!(q.tokenizer().produced, 1);
        assert_eq!(q.peek().unwrap().kind, TokenKind::Bof);
        assert_eq!(q.tokenizer().produced, 1);
        assert_eq!(q.peek_nth(2).unwrap().value, "2");
        assert_eq!(q.tokenizer().produced, 3);
        assert_eq!(q.buffered(), 3);
    }

    #[test]
    fn dequeue_in_order() {
        let mut q = queue(2, 2);
        assert_eq!(q.last_token_kind(), None);
        q.peek_nth(1).unwrap();
        assert_eq!(q.dequeue().unwrap().kind, TokenKind::Bof);
        assert_eq!(q.last_token_kind(), Some(TokenKind::Bof));
        assert_eq!(q.dequeue().unwrap().value, "1");
        assert_eq!(q.dequeue().unwrap().value, "2");
        assert_eq!(q.last_token_kind(), Some(TokenKind::PlainLiteral));
        assert_eq!(q.dequeue().unwrap().kind, TokenKind::Eof);
        assert_eq!(q.dequeue().unwrap().kind, TokenKind::Eof);
        assert_eq!(q.last_token_kind(), Some(TokenKind::Eof));
    }

    #[test]
    fn lookahead_bound() {
        let mut q = queue(5, 2);
        assert!(q.peek_nth(1).is_ok());
        let err = q.peek_nth(2).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::LookaheadExceeded(3)));
    }
}
