//! This crate provides parsers for the SPARQL results formats:
//!
//! * [SPARQL 1.1 Query Results CSV and TSV Formats](https://www.w3.org/TR/sparql11-results-csv-tsv/)
//!   ([`csv`] and [`tsv`]), built on a tokenizer and a lookahead queue;
//! * plain text boolean results ([`boolean`]);
//! * [SPARQL Query Results XML Format](https://www.w3.org/TR/rdf-sparql-XMLres/) ([`xml`]);
//! * [SPARQL 1.1 Query Results JSON Format](https://www.w3.org/TR/sparql11-results-json/) ([`json`]).
//!
//! All of them emit into a [`ResultsHandler`](tessera_api::handler::ResultsHandler).

pub mod boolean;
pub mod csv;
pub mod error;
pub mod json;
pub mod queue;
pub mod token;
pub mod tokenizer;
pub mod tsv;
pub mod xml;

mod tabular;

pub use error::{Error, ErrorKind};

#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();
