//! This crate provides a parser for [TriX],
//! an XML serialization of RDF datasets,
//! emitting quads into an [`RdfHandler`](tessera_api::handler::RdfHandler).
//!
//! [TriX]: https://www.hpl.hp.com/techreports/2004/HPL-2004-56.html

pub mod error;
pub mod parser;

pub use error::{TrixError, TrixErrorKind};
pub use parser::{TrixParser, TRIX_NS};

#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();
