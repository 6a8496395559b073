//! Parse a dataset or query results from the standard input,
//! in the format specified in the first argument,
//! and write them to the standard output:
//! datasets in [N-Quads], results as one line per row.
//!
//! Alternatively, the input file name can be provided as a second argument.
//! A `.gz` file name (or a format suffixed with `+gz`) is decompressed on the fly.
//!
//! The base IRI of datasets can be set via the environment variable `TESSERA_BASE`.
//! Warnings are logged; set `RUST_LOG=warn` to see them.
//!
//! Recognized formats are:
//! - [`trix`](https://www.hpl.hp.com/techreports/2004/HPL-2004-56.html)
//! - [`jsonld`](https://www.w3.org/TR/json-ld11) (in expanded form)
//! - [`csv`](https://www.w3.org/TR/sparql11-results-csv-tsv/)
//! - [`tsv`](https://www.w3.org/TR/sparql11-results-csv-tsv/)
//! - `boolean` (plain text `true` or `false`)
//! - [`srx`](https://www.w3.org/TR/rdf-sparql-XMLres/)
//! - [`srj`](https://www.w3.org/TR/sparql11-results-json/)
//! - `guess`: guess the format from the file name (default)
//!
//! [N-Quads]: https://www.w3.org/TR/n-quads/

use std::fs::File;
use std::io::{self, stdin, stdout, BufWriter, Read, Write};

use tessera::api::prelude::*;
use tessera::format::{extension, Compression, DatasetFormat, ResultsFormat};
use tessera::{AnyResultsParser, DatasetParser, GzipParser};

enum Format {
    Dataset(DatasetFormat),
    Results(ResultsFormat),
}

fn main() {
    env_logger::init();
    let format = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "guess".to_string());
    let path = std::env::args().nth(2);

    let (format, mut compression) = match format.strip_suffix("+gz") {
        Some(format) => (format.to_string(), Compression::Gzip),
        None => (format, Compression::None),
    };
    let format = if format == "guess" {
        let Some(filename) = &path else {
            eprintln!("Cannot guess format of stdin");
            std::process::exit(-2);
        };
        let (file_compression, stem) = Compression::from_file_name(filename);
        compression = file_compression;
        let ext = extension(stem).unwrap_or_default();
        match (
            DatasetFormat::from_extension(ext),
            ResultsFormat::from_extension(ext),
        ) {
            // "xml" is ambiguous, and TriX is the only XML dataset format
            (Some(f), _) => Format::Dataset(f),
            (None, Some(f)) => Format::Results(f),
            (None, None) => {
                eprintln!("Cannot guess format of {filename}");
                std::process::exit(-3);
            }
        }
    } else {
        match &format[..] {
            "trix" => Format::Dataset(DatasetFormat::TriX),
            "jsonld" | "json-ld" => Format::Dataset(DatasetFormat::JsonLd),
            "csv" => Format::Results(ResultsFormat::Csv),
            "tsv" => Format::Results(ResultsFormat::Tsv),
            "boolean" => Format::Results(ResultsFormat::Boolean),
            "srx" => Format::Results(ResultsFormat::Xml),
            "srj" => Format::Results(ResultsFormat::Json),
            _ => {
                eprintln!("Unrecognized format: {format}");
                std::process::exit(-1);
            }
        }
    };

    let input: Box<dyn Read> = match &path {
        None => Box::new(stdin()),
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("Can not open {path}: {err}");
                std::process::exit(-4);
            }
        },
    };
    let res = match format {
        Format::Dataset(format) => dump_quads(format, compression, input),
        Format::Results(format) => dump_results(format, compression, input),
    };
    if let Err(msg) = res {
        eprintln!("{msg}");
        std::process::exit(1);
    }
}

fn dump_quads(format: DatasetFormat, compression: Compression, input: Box<dyn Read>) -> Result<(), String> {
    let mut parser = DatasetParser::new(format);
    if let Some(base) = std::env::var_os("TESSERA_BASE") {
        let base = base
            .into_string()
            .map_err(|_| "Invalid UTF-8 data in TESSERA_BASE".to_string())?;
        parser = parser
            .with_base(&base)
            .map_err(|e| format!("Invalid TESSERA_BASE: {e}"))?;
    }
    let mut printer = Printer::new(stdout());
    let res = match compression {
        Compression::None => RdfParser::load(&parser, &mut printer, input),
        Compression::Gzip => RdfParser::load(&GzipParser::new(parser), &mut printer, input),
    };
    res.map_err(|e| format!("Error while parsing input: {e}"))?;
    printer.finish()
}

fn dump_results(format: ResultsFormat, compression: Compression, input: Box<dyn Read>) -> Result<(), String> {
    let parser = AnyResultsParser::new(format);
    let mut printer = Printer::new(stdout());
    let res = match compression {
        Compression::None => ResultsParser::load(&parser, &mut printer, input),
        Compression::Gzip => ResultsParser::load(&GzipParser::new(parser), &mut printer, input),
    };
    res.map_err(|e| format!("Error while parsing input: {e}"))?;
    printer.finish()
}

/// Writes everything it receives, and stops the parse on the first write error.
struct Printer<W: Write> {
    out: BufWriter<W>,
    error: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    fn new(out: W) -> Self {
        Printer {
            out: BufWriter::new(out),
            error: None,
        }
    }

    fn write(&mut self, line: std::fmt::Arguments) -> bool {
        match writeln!(self.out, "{line}") {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }

    fn finish(mut self) -> Result<(), String> {
        if let Some(err) = self.error.take() {
            return Err(format!("Error while writing output: {err}"));
        }
        self.out
            .flush()
            .map_err(|e| format!("Error while writing output: {e}"))
    }
}

impl<W: Write> NodeFactory for Printer<W> {}

impl<W: Write> RdfHandler for Printer<W> {
    fn handle_quad(&mut self, quad: Quad) -> bool {
        self.write(format_args!("{quad}"))
    }
}

impl<W: Write> ResultsHandler for Printer<W> {
    fn handle_boolean_result(&mut self, value: bool) {
        self.write(format_args!("{value}"));
    }

    fn handle_variable(&mut self, name: &str) -> bool {
        self.write(format_args!("?{name}"))
    }

    fn handle_result(&mut self, binding: ResultBinding) -> bool {
        let row: Vec<String> = binding
            .iter()
            .map(|(name, node)| match node {
                Some(node) => format!("{name}={node}"),
                None => format!("{name}="),
            })
            .collect();
        self.write(format_args!("{}", row.join("\t")))
    }
}
