//! Runtime selection of the refill strategy, based on the kind of source.
use std::io::{self, BufRead, Read};
use thiserror::Error;

use crate::source::{BlockingReader, CharSource, NonBlockingReader};

/// The default size of the buffer, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// What kind of reader a [`ParsingReader`] is built on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A local file: every read returns all available data.
    File,
    /// An in-memory buffer: every read returns all available data.
    Memory,
    /// Anything else (network, pipe, decompressor...):
    /// a read may return less than available without the stream being exhausted.
    #[default]
    Stream,
}

impl SourceKind {
    /// Whether a single read per refill is safe for this kind of source.
    pub fn is_non_blocking_safe(&self) -> bool {
        matches!(self, SourceKind::File | SourceKind::Memory)
    }
}

/// Errors raised when building a reader.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Buffer size must be at least 1, got {0}")]
    InvalidBufferSize(usize),
}

/// A buffered source whose refill strategy was chosen at construction.
#[derive(Debug)]
pub enum ParsingReader<R> {
    Blocking(BlockingReader<R>),
    NonBlocking(NonBlockingReader<R>),
}

impl<R: Read> ParsingReader<R> {
    /// Wrap `inner`, choosing the non-blocking strategy for files and memory,
    /// and the blocking one for anything else.
    pub fn new(kind: SourceKind, inner: R, buffer_size: usize) -> Result<Self, ReaderError> {
        log::trace!("building {:?} reader with buffer size {}", kind, buffer_size);
        if kind.is_non_blocking_safe() {
            NonBlockingReader::new(inner, buffer_size).map(ParsingReader::NonBlocking)
        } else {
            BlockingReader::new(inner, buffer_size).map(ParsingReader::Blocking)
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, ParsingReader::Blocking(_))
    }

    /// See [`BufferedSource::next_line`](crate::source::BufferedSource::next_line).
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        match self {
            ParsingReader::Blocking(r) => r.next_line(),
            ParsingReader::NonBlocking(r) => r.next_line(),
        }
    }
}

impl<R: Read> CharSource for ParsingReader<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self {
            ParsingReader::Blocking(r) => r.read_byte(),
            ParsingReader::NonBlocking(r) => r.read_byte(),
        }
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        match self {
            ParsingReader::Blocking(r) => r.peek_byte(),
            ParsingReader::NonBlocking(r) => r.peek_byte(),
        }
    }

    fn read_block(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ParsingReader::Blocking(r) => r.read_block(buf),
            ParsingReader::NonBlocking(r) => r.read_block(buf),
        }
    }

    fn is_at_end(&self) -> bool {
        match self {
            ParsingReader::Blocking(r) => r.is_at_end(),
            ParsingReader::NonBlocking(r) => r.is_at_end(),
        }
    }
}

impl<R: Read> Read for ParsingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ParsingReader::Blocking(r) => r.read(buf),
            ParsingReader::NonBlocking(r) => r.read(buf),
        }
    }
}

impl<R: Read> BufRead for ParsingReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            ParsingReader::Blocking(r) => r.fill_buf(),
            ParsingReader::NonBlocking(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            ParsingReader::Blocking(r) => r.consume(amt),
            ParsingReader::NonBlocking(r) => r.consume(amt),
        }
    }
}

/// How parsers wrap their input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    kind: SourceKind,
    buffer_size: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            kind: SourceKind::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Set the kind of source (default: [`SourceKind::Stream`]).
    pub fn with_kind(mut self, kind: SourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the buffer size (default: [`DEFAULT_BUFFER_SIZE`]).
    ///
    /// The size is checked when the reader is built.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Wrap `inner` according to these options.
    pub fn open<R: Read>(&self, inner: R) -> Result<ParsingReader<R>, ReaderError> {
        ParsingReader::new(self.kind, inner, self.buffer_size)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::test::ChunkedReader;
    use test_case::test_case;

    #[test_case(SourceKind::File, false)]
    #[test_case(SourceKind::Memory, false)]
    #[test_case(SourceKind::Stream, true)]
    fn strategy_by_kind(kind: SourceKind, blocking: bool) {
        let r = ParsingReader::new(kind, &b""[..], 16).unwrap();
        assert_eq!(r.is_blocking(), blocking);
    }

    #[test]
    fn invalid_buffer_size() {
        let opt = ReaderOptions::new().with_buffer_size(0);
        assert_eq!(
            opt.open(&b"x"[..]).err(),
            Some(ReaderError::InvalidBufferSize(0))
        );
    }

    #[test]
    fn stream_reads_everything() {
        let data = b"line one\nline two\r\nline three";
        let mut r = ReaderOptions::new()
            .with_buffer_size(5)
            .open(ChunkedReader::new(data, 2))
            .unwrap();
        let mut lines = vec![];
        while let Some(line) = r.next_line().unwrap() {
            lines.push(line);
        }
        assert_eq!(lines, ["line one", "line two", "line three"]);
        assert!(r.is_at_end());
    }
}
