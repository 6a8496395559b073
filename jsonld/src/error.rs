//! JSON-LD errors.

use tessera_api::parser::{Location, WithLocation};
use tessera_io::ReaderError;

/// JSON-LD error
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum JsonLdError {
    /// Invalid JSON encountered while parsing.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// An IO error.
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    /// The reader could not be built.
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// The document handed to the node map generation is not in expanded form.
    #[error("document is not in expanded form: {0}")]
    NotExpanded(String),

    /// A node has two different `@index` values.
    #[error("conflicting indexes for node {0}")]
    ConflictingIndexes(String),

    /// A value of an `@reverse` property is not a node object.
    #[error("invalid reverse property value for {0}")]
    InvalidReversePropertyValue(String),

    /// An error raised by an [`Expander`](crate::Expander).
    ///
    /// NB: expanders may have their own error types, so we keep the message only
    #[error("error while expanding: {0}")]
    ExpandError(String),
}

impl WithLocation for JsonLdError {
    fn location(&self) -> Location {
        match self {
            JsonLdError::InvalidJson(err) if err.line() > 0 => {
                Location::from_lico(err.line(), err.column())
            }
            _ => Location::Unknown,
        }
    }
}
