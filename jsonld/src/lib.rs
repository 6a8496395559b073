//! Parser for the [JSON-LD] concrete syntax of RDF.
//!
//! NB: this implementation does not include the JSON-LD [expansion algorithm].
//! Documents are turned into [expanded form] by an [`Expander`];
//! the default one, [`AlreadyExpanded`], only accepts documents which are already in that form.
//!
//! [JSON-LD]: https://www.w3.org/TR/json-ld11/
//! [expansion algorithm]: https://www.w3.org/TR/json-ld11-api/#expansion-algorithm
//! [expanded form]: https://www.w3.org/TR/json-ld11/#expanded-document-form

pub mod error;
pub use error::*;
pub mod expander;
pub use expander::*;
pub mod options;
pub use options::*;
pub mod parser;
pub use parser::*;
