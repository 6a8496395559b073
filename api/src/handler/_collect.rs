// this module is transparently re-exported by its parent `handler`
use super::*;

/// An [`RdfHandler`] collecting every quad it receives.
#[derive(Clone, Debug, Default)]
pub struct QuadCollector {
    pub quads: Vec<Quad>,
}

impl QuadCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The triples received in the default graph.
    pub fn default_graph(&self) -> impl Iterator<Item = &Triple> {
        self.quads
            .iter()
            .filter(|q| q.g().is_none())
            .map(Quad::triple)
    }
}

impl NodeFactory for QuadCollector {}

impl RdfHandler for QuadCollector {
    fn start_rdf(&mut self) {
        self.quads.clear();
    }

    fn handle_quad(&mut self, quad: Quad) -> bool {
        self.quads.push(quad);
        true
    }
}

/// A [`ResultsHandler`] collecting a whole SPARQL result set.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    pub variables: Vec<Box<str>>,
    pub bindings: Vec<ResultBinding>,
    pub boolean: Option<bool>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeFactory for ResultSet {}

impl ResultsHandler for ResultSet {
    fn start_results(&mut self) {
        self.variables.clear();
        self.bindings.clear();
        self.boolean = None;
    }

    fn handle_boolean_result(&mut self, value: bool) {
        self.boolean = Some(value);
    }

    fn handle_variable(&mut self, name: &str) -> bool {
        self.variables.push(name.into());
        true
    }

    fn handle_result(&mut self, binding: ResultBinding) -> bool {
        self.bindings.push(binding);
        true
    }
}
