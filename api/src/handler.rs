//! The consumer protocol that every parser emits into.
//!
//! A parser brackets its output between `start_*` and `end_*` calls,
//! and pushes each triple, quad or result to the handler as soon as it is complete.
//! Every `handle_*` method returning `bool` may return `false` to request
//! that parsing stops: this is a graceful stop, not an error.
use crate::binding::ResultBinding;
use crate::term::{BnodeId, LanguageTag, Literal, LiteralKind, Node};
use crate::triple::{Quad, Triple};
use std::ops::ControlFlow;

mod _collect;
pub use _collect::*;
mod _stop;
pub use _stop::*;

/// The outcome of a parse which did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The whole input was consumed.
    Completed,
    /// The handler requested to stop before the end of the input.
    StoppedByHandler,
}

impl ParseOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ParseOutcome::Completed)
    }
}

impl From<ControlFlow<()>> for ParseOutcome {
    fn from(value: ControlFlow<()>) -> Self {
        match value {
            ControlFlow::Continue(()) => ParseOutcome::Completed,
            ControlFlow::Break(()) => ParseOutcome::StoppedByHandler,
        }
    }
}

/// Convert the boolean returned by a `handle_*` method into a [`ControlFlow`].
pub fn keep_going(cont: bool) -> ControlFlow<()> {
    if cont {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(())
    }
}

/// Materializes the nodes produced by a parser.
///
/// Parsers never build [`Node`]s directly, they call these methods,
/// so that the handler owns the identity (and possibly interning) policy of nodes.
/// Values are validated by the parser before these methods are called.
pub trait NodeFactory {
    fn create_uri_node(&mut self, iri: &str) -> Node {
        Node::iri(iri)
    }

    fn create_blank_node(&mut self, id: BnodeId) -> Node {
        Node::BlankNode(id)
    }

    fn create_literal_node(&mut self, lexical: &str) -> Node {
        Node::plain(lexical)
    }

    fn create_lang_literal_node(&mut self, lexical: &str, tag: LanguageTag) -> Node {
        Node::Literal(Literal::new(lexical, LiteralKind::Lang(tag)))
    }

    fn create_typed_literal_node(&mut self, lexical: &str, datatype: &str) -> Node {
        Node::typed(lexical, datatype)
    }
}

/// A consumer of triples and quads.
pub trait RdfHandler: NodeFactory {
    /// Called once before anything else.
    fn start_rdf(&mut self) {}

    /// Called exactly once at the end of a parse,
    /// with `ok = false` if and only if the parse failed.
    fn end_rdf(&mut self, _ok: bool) {}

    /// Handle a triple of the default graph.
    fn handle_triple(&mut self, triple: Triple) -> bool {
        self.handle_quad(Quad::in_default_graph(triple))
    }

    /// Handle a quad.
    fn handle_quad(&mut self, quad: Quad) -> bool;
}

/// A consumer of SPARQL results.
pub trait ResultsHandler: NodeFactory {
    /// Called once before anything else.
    fn start_results(&mut self) {}

    /// Called exactly once at the end of a parse,
    /// with `ok = false` if and only if the parse failed.
    fn end_results(&mut self, _ok: bool) {}

    /// Handle the result of an ASK query.
    fn handle_boolean_result(&mut self, value: bool);

    /// Handle a variable declared in the header, in header order.
    fn handle_variable(&mut self, _name: &str) -> bool {
        true
    }

    /// Handle one row of results.
    fn handle_result(&mut self, binding: ResultBinding) -> bool;
}

impl<H: NodeFactory + ?Sized> NodeFactory for &mut H {
    fn create_uri_node(&mut self, iri: &str) -> Node {
        (**self).create_uri_node(iri)
    }
    fn create_blank_node(&mut self, id: BnodeId) -> Node {
        (**self).create_blank_node(id)
    }
    fn create_literal_node(&mut self, lexical: &str) -> Node {
        (**self).create_literal_node(lexical)
    }
    fn create_lang_literal_node(&mut self, lexical: &str, tag: LanguageTag) -> Node {
        (**self).create_lang_literal_node(lexical, tag)
    }
    fn create_typed_literal_node(&mut self, lexical: &str, datatype: &str) -> Node {
        (**self).create_typed_literal_node(lexical, datatype)
    }
}

impl<H: RdfHandler + ?Sized> RdfHandler for &mut H {
    fn start_rdf(&mut self) {
        (**self).start_rdf()
    }
    fn end_rdf(&mut self, ok: bool) {
        (**self).end_rdf(ok)
    }
    fn handle_triple(&mut self, triple: Triple) -> bool {
        (**self).handle_triple(triple)
    }
    fn handle_quad(&mut self, quad: Quad) -> bool {
        (**self).handle_quad(quad)
    }
}

impl<H: ResultsHandler + ?Sized> ResultsHandler for &mut H {
    fn start_results(&mut self) {
        (**self).start_results()
    }
    fn end_results(&mut self, ok: bool) {
        (**self).end_results(ok)
    }
    fn handle_boolean_result(&mut self, value: bool) {
        (**self).handle_boolean_result(value)
    }
    fn handle_variable(&mut self, name: &str) -> bool {
        (**self).handle_variable(name)
    }
    fn handle_result(&mut self, binding: ResultBinding) -> bool {
        (**self).handle_result(binding)
    }
}

/// Run `body` between [`RdfHandler::start_rdf`] and [`RdfHandler::end_rdf`].
///
/// `end_rdf` is called exactly once: with `true` if `body` completed
/// or was stopped by the handler, with `false` if it failed.
pub fn run_rdf<H, E, F>(handler: &mut H, body: F) -> Result<ParseOutcome, E>
where
    H: RdfHandler + ?Sized,
    F: FnOnce(&mut H) -> Result<ControlFlow<()>, E>,
{
    handler.start_rdf();
    let res = body(handler);
    handler.end_rdf(res.is_ok());
    res.map(ParseOutcome::from)
}

/// Run `body` between [`ResultsHandler::start_results`] and [`ResultsHandler::end_results`].
///
/// See [`run_rdf`].
pub fn run_results<H, E, F>(handler: &mut H, body: F) -> Result<ParseOutcome, E>
where
    H: ResultsHandler + ?Sized,
    F: FnOnce(&mut H) -> Result<ControlFlow<()>, E>,
{
    handler.start_results();
    let res = body(handler);
    handler.end_results(res.is_ok());
    res.map(ParseOutcome::from)
}
