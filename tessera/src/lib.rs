//! This crate is a toolkit for parsing [RDF] datasets and [SPARQL results]
//! from several concrete syntaxes, in a streaming fashion.
//!
//! Every parser pushes what it reads into a handler
//! ([`RdfHandler`](api::handler::RdfHandler) or [`ResultsHandler`](api::handler::ResultsHandler)),
//! which may request to stop at any time.
//!
//! It re-exports the crates of the toolkit:
//! * [`api`]: the data model, the handler protocol and the parser traits,
//! * [`io`]: the buffered sources the parsers read from,
//! * [`results`]: SPARQL results formats (CSV, TSV, boolean, XML, JSON),
//! * [`trix`]: the TriX format,
//! * [`jsonld`]: the JSON-LD format.
//!
//! It also provides a [`format`]-driven entry point ([`load_dataset`], [`load_results`])
//! with transparent [gzip](gzip) decompression.
//!
//! # Getting Started
//!
//! ```
//! use tessera::api::handler::ResultSet;
//! use tessera::format::{Compression, ResultsFormat};
//!
//! let csv = "x,y\r\nhttp://example.org/a,hello\r\n";
//! let mut results = ResultSet::new();
//! tessera::load_results(
//!     ResultsFormat::Csv,
//!     Compression::None,
//!     &mut results,
//!     csv.as_bytes(),
//!     &mut tessera::api::warning::LogWarnings,
//! )
//! .unwrap();
//! assert_eq!(results.variables.len(), 2);
//! assert_eq!(results.bindings.len(), 1);
//! ```
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//! [SPARQL results]: https://www.w3.org/TR/sparql11-results-json/

pub use tessera_api as api;
pub use tessera_io as io;
pub use tessera_jsonld as jsonld;
pub use tessera_results as results;
pub use tessera_trix as trix;

pub mod error;
pub mod format;
pub mod gzip;
pub mod load;

pub use error::Error;
pub use gzip::GzipParser;
pub use load::{load_dataset, load_results, AnyResultsParser, DatasetParser};
