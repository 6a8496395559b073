//! Configuration of [`JsonLdParser`](crate::JsonLdParser).

use tessera_api::iri::{parse_base, InvalidIri, Iri};
use tessera_io::ReaderOptions;

/// The subset of the [JSON-LD API options](https://www.w3.org/TR/json-ld11-api/#the-jsonldoptions-type)
/// that matters when deserializing an expanded document to RDF,
/// plus the buffering of the input.
#[derive(Clone, Debug, Default)]
pub struct JsonLdOptions {
    base: Option<Iri<String>>,
    generalized: bool,
    reader: ReaderOptions,
}

impl JsonLdOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base IRI for the relative IRIs left in the expanded document.
    ///
    /// Expanded documents normally contain none;
    /// without a base, the ones found are skipped (with a warning).
    pub fn base(&self) -> Option<&Iri<String>> {
        self.base.as_ref()
    }

    /// Whether triples with a blank node predicate are emitted (`produceGeneralizedRdf`).
    /// They are dropped by default.
    pub fn produce_generalized_rdf(&self) -> bool {
        self.generalized
    }

    pub fn reader(&self) -> &ReaderOptions {
        &self.reader
    }

    /// Fails if `base` is not an absolute IRI.
    pub fn with_base(mut self, base: &str) -> Result<Self, InvalidIri> {
        self.base = Some(parse_base(base)?);
        Ok(self)
    }

    pub fn with_produce_generalized_rdf(mut self, generalized: bool) -> Self {
        self.generalized = generalized;
        self
    }

    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }
}
