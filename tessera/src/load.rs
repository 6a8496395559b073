//! Dispatching an input to the parser of its format.
use std::io::Read;

use tessera_api::handler::{ParseOutcome, RdfHandler, ResultsHandler};
use tessera_api::iri::InvalidIri;
use tessera_api::parser::{RdfParser, ResultsParser};
use tessera_api::warning::WarningSink;
use tessera_io::ReaderOptions;
use tessera_jsonld::{JsonLdOptions, JsonLdParser};
use tessera_results::boolean::SparqlBooleanParser;
use tessera_results::csv::SparqlCsvParser;
use tessera_results::json::SparqlJsonParser;
use tessera_results::tsv::SparqlTsvParser;
use tessera_results::xml::SparqlXmlParser;
use tessera_trix::TrixParser;

use crate::error::Error;
use crate::format::{Compression, DatasetFormat, ResultsFormat};
use crate::gzip::GzipParser;

/// A parser for any [`DatasetFormat`].
#[derive(Clone, Debug)]
pub enum DatasetParser {
    TriX(TrixParser),
    JsonLd(JsonLdParser),
}

impl DatasetParser {
    /// The parser of `format`, with its default configuration.
    pub fn new(format: DatasetFormat) -> Self {
        match format {
            DatasetFormat::TriX => DatasetParser::TriX(TrixParser::new()),
            DatasetFormat::JsonLd => DatasetParser::JsonLd(JsonLdParser::new()),
        }
    }

    pub fn format(&self) -> DatasetFormat {
        match self {
            DatasetParser::TriX(_) => DatasetFormat::TriX,
            DatasetParser::JsonLd(_) => DatasetFormat::JsonLd,
        }
    }

    /// Set the base IRI against which relative IRIs are resolved.
    pub fn with_base(self, base: &str) -> Result<Self, InvalidIri> {
        Ok(match self {
            DatasetParser::TriX(p) => DatasetParser::TriX(p.with_base(base)?),
            DatasetParser::JsonLd(p) => {
                let options = p.options().clone().with_base(base)?;
                DatasetParser::JsonLd(p.with_options(options))
            }
        })
    }

    pub fn with_reader_options(self, reader: ReaderOptions) -> Self {
        match self {
            DatasetParser::TriX(p) => DatasetParser::TriX(p.with_reader_options(reader)),
            DatasetParser::JsonLd(p) => {
                let options: JsonLdOptions = p.options().clone().with_reader_options(reader);
                DatasetParser::JsonLd(p.with_options(options))
            }
        }
    }
}

impl From<DatasetFormat> for DatasetParser {
    fn from(format: DatasetFormat) -> Self {
        DatasetParser::new(format)
    }
}

impl<R: Read> RdfParser<R> for DatasetParser {
    type Error = Error;

    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, Error>
    where
        H: RdfHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        log::debug!("parsing {}", self.format());
        match self {
            DatasetParser::TriX(p) => Ok(p.load_with_warnings(handler, input, warnings)?),
            DatasetParser::JsonLd(p) => Ok(p.load_with_warnings(handler, input, warnings)?),
        }
    }
}

/// A parser for any [`ResultsFormat`].
#[derive(Clone, Debug)]
pub enum AnyResultsParser {
    Csv(SparqlCsvParser),
    Tsv(SparqlTsvParser),
    Boolean(SparqlBooleanParser),
    Xml(SparqlXmlParser),
    Json(SparqlJsonParser),
}

impl AnyResultsParser {
    /// The parser of `format`, with its default configuration.
    pub fn new(format: ResultsFormat) -> Self {
        match format {
            ResultsFormat::Csv => AnyResultsParser::Csv(SparqlCsvParser::new()),
            ResultsFormat::Tsv => AnyResultsParser::Tsv(SparqlTsvParser::new()),
            ResultsFormat::Boolean => AnyResultsParser::Boolean(SparqlBooleanParser::new()),
            ResultsFormat::Xml => AnyResultsParser::Xml(SparqlXmlParser::new()),
            ResultsFormat::Json => AnyResultsParser::Json(SparqlJsonParser::new()),
        }
    }

    pub fn format(&self) -> ResultsFormat {
        match self {
            AnyResultsParser::Csv(_) => ResultsFormat::Csv,
            AnyResultsParser::Tsv(_) => ResultsFormat::Tsv,
            AnyResultsParser::Boolean(_) => ResultsFormat::Boolean,
            AnyResultsParser::Xml(_) => ResultsFormat::Xml,
            AnyResultsParser::Json(_) => ResultsFormat::Json,
        }
    }

    pub fn with_reader_options(self, reader: ReaderOptions) -> Self {
        match self {
            AnyResultsParser::Csv(p) => AnyResultsParser::Csv(p.with_reader_options(reader)),
            AnyResultsParser::Tsv(p) => AnyResultsParser::Tsv(p.with_reader_options(reader)),
            AnyResultsParser::Boolean(p) => {
                AnyResultsParser::Boolean(p.with_reader_options(reader))
            }
            AnyResultsParser::Xml(p) => AnyResultsParser::Xml(p.with_reader_options(reader)),
            AnyResultsParser::Json(p) => AnyResultsParser::Json(p.with_reader_options(reader)),
        }
    }
}

impl From<ResultsFormat> for AnyResultsParser {
    fn from(format: ResultsFormat) -> Self {
        AnyResultsParser::new(format)
    }
}

impl<R: Read> ResultsParser<R> for AnyResultsParser {
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
        log::debug!("parsing {}", self.format());
        let outcome = match self {
            AnyResultsParser::Csv(p) => p.load_with_warnings(handler, input, warnings),
            AnyResultsParser::Tsv(p) => p.load_with_warnings(handler, input, warnings),
            AnyResultsParser::Boolean(p) => p.load_with_warnings(handler, input, warnings),
            AnyResultsParser::Xml(p) => p.load_with_warnings(handler, input, warnings),
            AnyResultsParser::Json(p) => p.load_with_warnings(handler, input, warnings),
        }?;
        Ok(outcome)
    }
}

/// Parse a dataset in `format` from `input` into `handler`.
pub fn load_dataset<R, H, W>(
    format: DatasetFormat,
    compression: Compression,
    handler: &mut H,
    input: R,
    warnings: &mut W,
) -> Result<ParseOutcome, Error>
where
    R: Read,
    H: RdfHandler + ?Sized,
    W: WarningSink + ?Sized,
{
    let parser = DatasetParser::new(format);
    match compression {
        Compression::None => RdfParser::load_with_warnings(&parser, handler, input, warnings),
        Compression::Gzip => {
            RdfParser::load_with_warnings(&GzipParser::new(parser), handler, input, warnings)
        }
    }
}

/// Parse query results in `format` from `input` into `handler`.
pub fn load_results<R, H, W>(
    format: ResultsFormat,
    compression: Compression,
    handler: &mut H,
    input: R,
    warnings: &mut W,
) -> Result<ParseOutcome, Error>
where
    R: Read,
    H: ResultsHandler + ?Sized,
    W: WarningSink + ?Sized,
{
    let parser = AnyResultsParser::new(format);
    match compression {
        Compression::None => ResultsParser::load_with_warnings(&parser, handler, input, warnings),
        Compression::Gzip => {
            ResultsParser::load_with_warnings(&GzipParser::new(parser), handler, input, warnings)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tessera_api::handler::{QuadCollector, ResultSet};
    use test_case::test_case;

    #[test_case(ResultsFormat::Csv, "x\r\ntrue\r\n")]
    #[test_case(ResultsFormat::Tsv, "?x\ntrue\n")]
    #[test_case(ResultsFormat::Xml, r#"<sparql xmlns="http://www.w3.org/2005/sparql-results#"><head><variable name="x"/></head><results><result><binding name="x"><literal>true</literal></binding></result></results></sparql>"#)]
    #[test_case(ResultsFormat::Json, r#"{"head": {"vars": ["x"]}, "results": {"bindings": [{"x": {"type": "literal", "value": "true"}}]}}"#)]
    fn one_row_in_every_tabular_format(format: ResultsFormat, src: &str) {
        let mut h = ResultSet::new();
        let mut warnings: Vec<String> = vec![];
        let outcome =
            load_results(format, Compression::None, &mut h, src.as_bytes(), &mut warnings).unwrap();
        assert!(outcome.is_completed());
        assert_eq!(h.variables.len(), 1);
        assert_eq!(h.bindings.len(), 1);
        assert_eq!(h.bindings[0].bound_count(), 1);
    }

    #[test]
    fn boolean_format() {
        let mut h = ResultSet::new();
        load_results(
            ResultsFormat::Boolean,
            Compression::None,
            &mut h,
            &b"false"[..],
            &mut tessera_api::warning::IgnoreWarnings,
        )
        .unwrap();
        assert_eq!(h.boolean, Some(false));
    }

    #[test]
    fn errors_are_wrapped() {
        let mut h = QuadCollector::new();
        let err = load_dataset(
            DatasetFormat::JsonLd,
            Compression::None,
            &mut h,
            &b"[{"[..],
            &mut tessera_api::warning::IgnoreWarnings,
        )
        .unwrap_err();
        assert!(matches!(err, Error::JsonLd(_)));
    }

    #[test]
    fn dataset_parser_with_base() {
        for format in DatasetFormat::ALL {
            let parser = DatasetParser::new(format)
                .with_base("http://example.org/")
                .unwrap();
            assert_eq!(parser.format(), format);
        }
        assert!(DatasetParser::new(DatasetFormat::TriX)
            .with_base("not an iri")
            .is_err());
    }
}
