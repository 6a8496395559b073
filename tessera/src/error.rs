//! The error type of the format-driven entry points.
use tessera_api::parser::{Location, WithLocation};
use tessera_io::ReaderError;
use tessera_jsonld::JsonLdError;
use tessera_trix::TrixError;
use thiserror::Error;

/// Any error raised by one of the parsers of this toolkit.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Trix(#[from] TrixError),
    #[error(transparent)]
    JsonLd(#[from] JsonLdError),
    #[error(transparent)]
    Results(#[from] tessera_results::Error),
    /// Raised while sniffing or decompressing the input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Reader(#[from] ReaderError),
}

impl WithLocation for Error {
    fn location(&self) -> Location {
        match self {
            Error::Trix(err) => err.location(),
            Error::JsonLd(err) => err.location(),
            Error::Results(err) => err.location(),
            Error::Io(_) | Error::Reader(_) => Location::Unknown,
        }
    }
}
