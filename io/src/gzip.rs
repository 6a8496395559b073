//! Transparent gzip decompression.
use flate2::bufread::MultiGzDecoder;
use std::io::{self, BufRead, Read};

/// The two magic bytes starting every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A reader that decompresses its input if (and only if) it starts with the gzip magic bytes.
pub enum MaybeGzip<R: BufRead> {
    Plain(R),
    Gzip(MultiGzDecoder<R>),
}

impl<R: BufRead> MaybeGzip<R> {
    /// Sniff the first bytes of `inner`, without consuming them.
    ///
    /// `inner` must buffer at least two bytes per `fill_buf`
    /// unless it is exhausted (as does [`BlockingReader`](crate::BlockingReader)).
    pub fn detect(mut inner: R) -> io::Result<Self> {
        let head = inner.fill_buf()?;
        if head.starts_with(&GZIP_MAGIC) {
            log::debug!("gzip input detected");
            Ok(MaybeGzip::Gzip(MultiGzDecoder::new(inner)))
        } else {
            Ok(MaybeGzip::Plain(inner))
        }
    }

    pub fn is_gzip(&self) -> bool {
        matches!(self, MaybeGzip::Gzip(_))
    }
}

impl<R: BufRead> Read for MaybeGzip<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            MaybeGzip::Plain(r) => r.read(buf),
            MaybeGzip::Gzip(r) => r.read(buf),
        }
    }
}
