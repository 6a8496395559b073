// this module is transparently re-exported by its parent `handler`
use super::*;

/// Wraps a handler and requests a stop once it has received `limit` items
/// (quads or results).
///
/// The item that reaches the limit is still forwarded to the inner handler.
#[derive(Clone, Debug)]
pub struct StopAfter<H> {
    inner: H,
    limit: usize,
    seen: usize,
    ended: usize,
}

impl<H> StopAfter<H> {
    pub fn new(inner: H, limit: usize) -> Self {
        StopAfter {
            inner,
            limit,
            seen: 0,
            ended: 0,
        }
    }

    /// The number of items forwarded so far.
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// The number of times `end_rdf` or `end_results` was called.
    pub fn end_calls(&self) -> usize {
        self.ended
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }

    fn count(&mut self, cont: bool) -> bool {
        self.seen += 1;
        cont && self.seen < self.limit
    }
}

impl<H: NodeFactory> NodeFactory for StopAfter<H> {
    fn create_uri_node(&mut self, iri: &str) -> Node {
        self.inner.create_uri_node(iri)
    }
    fn create_blank_node(&mut self, id: BnodeId) -> Node {
        self.inner.create_blank_node(id)
    }
    fn create_literal_node(&mut self, lexical: &str) -> Node {
        self.inner.create_literal_node(lexical)
    }
    fn create_lang_literal_node(&mut self, lexical: &str, tag: LanguageTag) -> Node {
        self.inner.create_lang_literal_node(lexical, tag)
    }
    fn create_typed_literal_node(&mut self, lexical: &str, datatype: &str) -> Node {
        self.inner.create_typed_literal_node(lexical, datatype)
    }
}

impl<H: RdfHandler> RdfHandler for StopAfter<H> {
    fn start_rdf(&mut self) {
        self.inner.start_rdf()
    }

    fn end_rdf(&mut self, ok: bool) {
        self.ended += 1;
        self.inner.end_rdf(ok)
    }

    fn handle_quad(&mut self, quad: Quad) -> bool {
        let cont = self.inner.handle_quad(quad);
        self.count(cont)
    }
}

impl<H: ResultsHandler> ResultsHandler for StopAfter<H> {
    fn start_results(&mut self) {
        self.inner.start_results()
    }

    fn end_results(&mut self, ok: bool) {
        self.ended += 1;
        self.inner.end_results(ok)
    }

    fn handle_boolean_result(&mut self, value: bool) {
        self.inner.handle_boolean_result(value)
    }

    fn handle_variable(&mut self, name: &str) -> bool {
        self.inner.handle_variable(name)
    }

    fn handle_result(&mut self, binding: ResultBinding) -> bool {
        let cont = self.inner.handle_result(binding);
        self.count(cont)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stops_at_limit() {
        let mut h = StopAfter::new(QuadCollector::new(), 2);
        let t = Triple::new(Node::iri("http://s"), Node::iri("http://p"), Node::plain("o")).unwrap();
        assert!(h.handle_triple(t.clone()));
        assert!(!h.handle_triple(t));
        assert_eq!(h.seen(), 2);
        assert_eq!(h.inner().quads.len(), 2);
    }
}
