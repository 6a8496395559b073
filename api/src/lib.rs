//! This crate defines the data model and the consumer protocol
//! shared by all the tessera parsers.
//!
//! * [`term`] defines [`Node`](term::Node), the parse-time value of an RDF term;
//! * [`triple`] defines [`Triple`](triple::Triple) and [`Quad`](triple::Quad);
//! * [`binding`] defines [`ResultBinding`](binding::ResultBinding), one row of SPARQL results;
//! * [`handler`] defines the sinks parsers push their output into;
//! * [`parser`] defines the traits implemented by every parser.

pub mod binding;
pub mod handler;
pub mod iri;
pub mod ns;
pub mod parser;
pub mod term;
pub mod triple;
pub mod warning;

pub mod prelude {
    //! Re-exports the traits and types most commonly needed to use a parser.
    pub use crate::binding::ResultBinding;
    pub use crate::handler::{NodeFactory, ParseOutcome, RdfHandler, ResultsHandler};
    pub use crate::parser::{RdfParser, ResultsParser};
    pub use crate::term::{Literal, LiteralKind, Node};
    pub use crate::triple::{Quad, Triple};
    pub use crate::warning::{LogWarnings, WarningSink};
}
