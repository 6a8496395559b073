//! Parsing gzip-compressed inputs with any parser.
use std::io::{self, Read};

use tessera_api::handler::{run_rdf, run_results, ParseOutcome, RdfHandler, ResultsHandler};
use tessera_api::parser::{RdfParser, ResultsParser};
use tessera_api::warning::WarningSink;
use tessera_io::gzip::MaybeGzip;
use tessera_io::reader::DEFAULT_BUFFER_SIZE;
use tessera_io::{BlockingReader, ReaderError};

/// The input handed to the parser wrapped by a [`GzipParser`].
pub type GzipInput<R> = MaybeGzip<BlockingReader<R>>;

/// Wraps a parser so that its input is decompressed when it is gzip.
///
/// An input which is not gzip is passed through unchanged, with a warning.
#[derive(Clone, Debug)]
pub struct GzipParser<P> {
    inner: P,
    buffer_size: usize,
}

impl<P> GzipParser<P> {
    pub fn new(inner: P) -> Self {
        GzipParser {
            inner,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Change the size of the buffer the compressed input is read through.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    fn open<R, W, E>(&self, input: R, warnings: &mut W) -> Result<GzipInput<R>, E>
    where
        R: Read,
        W: WarningSink + ?Sized,
        E: From<io::Error> + From<ReaderError>,
    {
        let source = BlockingReader::new(input, self.buffer_size)?;
        let input = MaybeGzip::detect(source)?;
        if !input.is_gzip() {
            warnings.warn("Input is not gzip-compressed, reading it uncompressed");
        }
        Ok(input)
    }
}

impl<R, P> RdfParser<R> for GzipParser<P>
where
    R: Read,
    P: RdfParser<GzipInput<R>>,
    P::Error: From<io::Error> + From<ReaderError>,
{
    type Error = P::Error;

    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, Self::Error>
    where
        H: RdfHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        match self.open(input, warnings) {
            Ok(input) => self.inner.load_with_warnings(handler, input, warnings),
            // the handler still sees a (failed) parse
            Err(err) => run_rdf(handler, |_| Err(err)),
        }
    }
}

impl<R, P> ResultsParser<R> for GzipParser<P>
where
    R: Read,
    P: ResultsParser<GzipInput<R>>,
    P::Error: From<io::Error> + From<ReaderError>,
{
    type Error = P::Error;

    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, Self::Error>
    where
        H: ResultsHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        match self.open(input, warnings) {
            Ok(input) => self.inner.load_with_warnings(handler, input, warnings),
            Err(err) => run_results(handler, |_| Err(err)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tessera_api::handler::{QuadCollector, ResultSet};
    use tessera_results::boolean::SparqlBooleanParser;
    use tessera_trix::TrixParser;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn compressed_results() {
        let mut h = ResultSet::new();
        let mut warnings: Vec<String> = vec![];
        let input = gzip(b"  TRUE\n");
        let parser = GzipParser::new(SparqlBooleanParser::new());
        ResultsParser::load_with_warnings(&parser, &mut h, &input[..], &mut warnings).unwrap();
        assert_eq!(h.boolean, Some(true));
        assert!(warnings.is_empty());
    }

    #[test]
    fn uncompressed_input_is_read_with_a_warning() {
        let mut h = ResultSet::new();
        let mut warnings: Vec<String> = vec![];
        let parser = GzipParser::new(SparqlBooleanParser::new());
        ResultsParser::load_with_warnings(&parser, &mut h, &b"false"[..], &mut warnings).unwrap();
        assert_eq!(h.boolean, Some(false));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn compressed_trix() {
        let src = r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/"><graph>
            <triple><uri>tag:s</uri><uri>tag:p</uri><plainLiteral>o</plainLiteral></triple>
        </graph></TriX>"#;
        let mut h = QuadCollector::new();
        let input = gzip(src.as_bytes());
        let parser = GzipParser::new(TrixParser::new()).with_buffer_size(3);
        RdfParser::load(&parser, &mut h, &input[..]).unwrap();
        assert_eq!(h.quads.len(), 1);
    }

    #[test]
    fn invalid_buffer_size_still_ends_the_parse() {
        let mut h = tessera_api::handler::StopAfter::new(ResultSet::new(), 10);
        let parser = GzipParser::new(SparqlBooleanParser::new()).with_buffer_size(0);
        let err = ResultsParser::load(&parser, &mut h, &b"true"[..]).unwrap_err();
        assert!(matches!(
            err.kind(),
            tessera_results::ErrorKind::Reader(ReaderError::InvalidBufferSize(0))
        ));
        assert_eq!(h.end_calls(), 1);
    }
}
