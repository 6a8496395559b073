//! I define [`CharSource`] and its buffered implementation [`BufferedSource`].
//!
//! The buffer is refilled only when every buffered byte has been consumed.
//! How a refill talks to the underlying reader is decided by a [`Refill`] strategy.
use std::io::{self, BufRead, Read};
use std::marker::PhantomData;

use crate::reader::ReaderError;

/// A forward-only source of bytes, with one byte of lookahead.
///
/// `None` marks the end of the input.
pub trait CharSource {
    /// Consume and return the next byte.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Return the next byte without consuming it.
    fn peek_byte(&mut self) -> io::Result<Option<u8>>;

    /// Fill `buf` as much as possible, refilling across buffer boundaries.
    ///
    /// Returns fewer than `buf.len()` bytes only at the true end of the input.
    fn read_block(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// True once the underlying reader is known to be exhausted
    /// and every buffered byte has been consumed.
    fn is_at_end(&self) -> bool;
}

/// How a [`BufferedSource`] refills its buffer.
pub trait Refill {
    /// Read from `inner` into `buf`,
    /// returning the number of bytes read and whether `inner` is exhausted.
    fn refill<R: Read>(inner: &mut R, buf: &mut [u8]) -> io::Result<(usize, bool)>;
}

/// Keep reading until the buffer is full or the reader returns 0.
///
/// This is required for readers that return partial reads under latency
/// without being exhausted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blocking;

impl Refill for Blocking {
    fn refill<R: Read>(inner: &mut R, buf: &mut [u8]) -> io::Result<(usize, bool)> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = inner.read(&mut buf[filled..])?;
            if n == 0 {
                return Ok((filled, true));
            }
            filled += n;
        }
        Ok((filled, false))
    }
}

/// Perform exactly one read; a read of 0 bytes means the reader is exhausted.
///
/// Only suited to readers that always return all immediately available data.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonBlocking;

impl Refill for NonBlocking {
    fn refill<R: Read>(inner: &mut R, buf: &mut [u8]) -> io::Result<(usize, bool)> {
        let n = inner.read(buf)?;
        Ok((n, n == 0))
    }
}

/// A fixed-capacity buffer over a reader.
///
/// Invariant: `pos <= fill <= buffer.len()`;
/// once `exhausted` is set, it is never cleared.
#[derive(Debug)]
pub struct BufferedSource<R, S> {
    inner: R,
    buffer: Box<[u8]>,
    pos: usize,
    fill: usize,
    exhausted: bool,
    _strategy: PhantomData<S>,
}

/// A [`BufferedSource`] using the [`Blocking`] strategy.
pub type BlockingReader<R> = BufferedSource<R, Blocking>;
/// A [`BufferedSource`] using the [`NonBlocking`] strategy.
pub type NonBlockingReader<R> = BufferedSource<R, NonBlocking>;

impl<R: Read, S: Refill> BufferedSource<R, S> {
    /// Wrap `inner` with a buffer of `buffer_size` bytes.
    ///
    /// No I/O is performed until the first byte is requested.
    pub fn new(inner: R, buffer_size: usize) -> Result<Self, ReaderError> {
        if buffer_size < 1 {
            return Err(ReaderError::InvalidBufferSize(buffer_size));
        }
        Ok(BufferedSource {
            inner,
            buffer: vec![0; buffer_size].into_boxed_slice(),
            pos: 0,
            fill: 0,
            exhausted: false,
            _strategy: PhantomData,
        })
    }

    /// The capacity of the buffer.
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read one line, where `\n`, `\r` and `\r\n` each terminate a line.
    ///
    /// The terminator is not included; invalid UTF-8 is replaced.
    /// Returns `None` at the end of the input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        loop {
            match self.read_byte()? {
                None if line.is_empty() => return Ok(None),
                None | Some(b'\n') => break,
                Some(b'\r') => {
                    if self.peek_byte()? == Some(b'\n') {
                        self.pos += 1;
                    }
                    break;
                }
                Some(b) => line.push(b),
            }
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Make sure at least one byte is buffered, unless the input is exhausted.
    fn ensure_buffered(&mut self) -> io::Result<bool> {
        if self.pos < self.fill {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }
        let (n, exhausted) = S::refill(&mut self.inner, &mut self.buffer)?;
        self.pos = 0;
        self.fill = n;
        if exhausted {
            log::trace!("underlying reader exhausted");
            self.exhausted = true;
        }
        Ok(self.fill > 0)
    }
}

impl<R: Read, S: Refill> CharSource for BufferedSource<R, S> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if !self.ensure_buffered()? {
            return Ok(None);
        }
        let b = self.buffer[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if !self.ensure_buffered()? {
            return Ok(None);
        }
        Ok(Some(self.buffer[self.pos]))
    }

    fn read_block(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut done = 0;
        while done < buf.len() && self.ensure_buffered()? {
            let n = (buf.len() - done).min(self.fill - self.pos);
            buf[done..done + n].copy_from_slice(&self.buffer[self.pos..self.pos + n]);
            self.pos += n;
            done += n;
        }
        Ok(done)
    }

    fn is_at_end(&self) -> bool {
        self.exhausted && self.pos >= self.fill
    }
}

impl<R: Read, S: Refill> Read for BufferedSource<R, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<R: Read, S: Refill> BufRead for BufferedSource<R, S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.ensure_buffered()?;
        Ok(&self.buffer[self.pos..self.fill])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.fill);
    }
}
