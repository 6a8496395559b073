//! [Deserialize JSON-LD to RDF](https://www.w3.org/TR/json-ld11-api/#deserialize-json-ld-to-rdf-algorithm),
//! from a [`NodeMap`].
use serde_json::{Map, Number, Value};
use std::ops::ControlFlow;

use tessera_api::handler::RdfHandler;
use tessera_api::iri::{is_absolute_iri, resolve_iri, Iri};
use tessera_api::ns::{rdf, xsd};
use tessera_api::term::{BnodeId, LanguageTag, Node};
use tessera_api::triple::{Quad, Triple};
use tessera_api::warning::WarningSink;

use super::bnode_gen::BNodeGen;
use super::node_map::{NodeMap, NodeObjectEntry, DEFAULT_GRAPH};
use crate::JsonLdOptions;

pub(crate) struct RdfEmitter<'a, H: ?Sized, W: ?Sized> {
    handler: &'a mut H,
    warnings: &'a mut W,
    bnodes: &'a mut BNodeGen,
    base: Option<&'a Iri<String>>,
    generalized: bool,
}

impl<'a, H, W> RdfEmitter<'a, H, W>
where
    H: RdfHandler + ?Sized,
    W: WarningSink + ?Sized,
{
    pub fn new(
        options: &'a JsonLdOptions,
        bnodes: &'a mut BNodeGen,
        handler: &'a mut H,
        warnings: &'a mut W,
    ) -> Self {
        RdfEmitter {
            handler,
            warnings,
            bnodes,
            base: options.base(),
            generalized: options.produce_generalized_rdf(),
        }
    }

    /// Push every quad of `node_map` to the handler, graph by graph.
    pub fn emit(&mut self, node_map: &NodeMap) -> ControlFlow<()> {
        for (graph_name, graph) in node_map {
            let graph_node = if graph_name == DEFAULT_GRAPH {
                None
            } else {
                match self.resource(graph_name) {
                    Some(node) => Some(node),
                    None => continue,
                }
            };
            for (id, node) in graph {
                let Some(subject) = self.resource(id) else {
                    continue;
                };
                for ty in node.types() {
                    let Some(object) = self.resource(ty) else {
                        continue;
                    };
                    let predicate = self.handler.create_uri_node(rdf::type_);
                    if !self.quad(subject.clone(), predicate, object, &graph_node) {
                        return ControlFlow::Break(());
                    }
                }
                for (property, values) in node.properties() {
                    let Some(predicate) = self.resource(property) else {
                        continue;
                    };
                    if predicate.is_blank_node() && !self.generalized {
                        log::trace!("skipping blank node predicate {property}");
                        continue;
                    }
                    for value in values {
                        let mut list_triples = vec![];
                        let Some(object) = self.object(value, &mut list_triples) else {
                            continue;
                        };
                        if !self.quad(subject.clone(), predicate.clone(), object, &graph_node) {
                            return ControlFlow::Break(());
                        }
                        for [s, p, o] in list_triples {
                            if !self.quad(s, p, o, &graph_node) {
                                return ControlFlow::Break(());
                            }
                        }
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Returns `false` if the handler asked to stop.
    fn quad(&mut self, s: Node, p: Node, o: Node, graph: &Option<Node>) -> bool {
        let triple = if self.generalized {
            Ok(Triple::new_generalized(s, p, o))
        } else {
            Triple::new(s, p, o)
        };
        match triple.and_then(|t| Quad::new(t, graph.clone())) {
            Ok(quad) => self.handler.handle_quad(quad),
            Err(err) => {
                self.warnings.warn(&format!("Skipping invalid triple: {err}"));
                true
            }
        }
    }

    /// The node identified by `id` (an IRI or a blank node identifier).
    fn resource(&mut self, id: &str) -> Option<Node> {
        if let Some(label) = id.strip_prefix("_:") {
            // node map identifiers are always generated
            return Some(self.handler.create_blank_node(BnodeId::new_unchecked(label)));
        }
        if is_absolute_iri(id) {
            return Some(self.handler.create_uri_node(id));
        }
        match self.base {
            Some(base) => match resolve_iri(Some(base), id) {
                Ok(iri) => Some(self.handler.create_uri_node(&iri)),
                Err(err) => {
                    self.warnings.warn(&format!("Skipping {err}"));
                    None
                }
            },
            None => {
                self.warnings
                    .warn(&format!("Skipping relative IRI '{id}' (no base IRI)"));
                None
            }
        }
    }

    /// The node for `entry`; RDF lists append their own triples to `list_triples`.
    fn object(&mut self, entry: &NodeObjectEntry, list_triples: &mut Vec<[Node; 3]>) -> Option<Node> {
        match entry {
            NodeObjectEntry::Id(id) => self.resource(id),
            NodeObjectEntry::Value(value) => self.value(value),
            NodeObjectEntry::List(items) => Some(self.list(items, list_triples)),
        }
    }

    fn list(&mut self, items: &[NodeObjectEntry], list_triples: &mut Vec<[Node; 3]>) -> Node {
        if items.is_empty() {
            return self.handler.create_uri_node(rdf::nil);
        }
        let cells: Vec<Node> = items
            .iter()
            .map(|_| {
                let label = self.bnodes.fresh();
                self.handler
                    .create_blank_node(BnodeId::new_unchecked(&label[2..]))
            })
            .collect();
        for (i, item) in items.iter().enumerate() {
            let mut nested = vec![];
            if let Some(object) = self.object(item, &mut nested) {
                let first = self.handler.create_uri_node(rdf::first);
                list_triples.push([cells[i].clone(), first, object]);
            }
            list_triples.extend(nested);
            let rest = self.handler.create_uri_node(rdf::rest);
            let next = match cells.get(i + 1) {
                Some(cell) => cell.clone(),
                None => self.handler.create_uri_node(rdf::nil),
            };
            list_triples.push([cells[i].clone(), rest, next]);
        }
        cells[0].clone()
    }

    fn value(&mut self, value: &Map<String, Value>) -> Option<Node> {
        let datatype = value.get("@type").and_then(Value::as_str);
        let literal = value.get("@value")?;
        if datatype == Some("@json") {
            let lexical = serde_json::to_string(literal).ok()?;
            return Some(self.handler.create_typed_literal_node(&lexical, rdf::JSON));
        }
        let datatype = match datatype {
            Some(dt) => Some(self.datatype(dt)?),
            None => None,
        };
        match literal {
            Value::Bool(b) => {
                let lexical = if *b { "true" } else { "false" };
                let dt = datatype.as_deref().unwrap_or(xsd::boolean);
                Some(self.handler.create_typed_literal_node(lexical, dt))
            }
            Value::Number(n) => {
                let (lexical, default_dt) = canonical_number(n, datatype.as_deref());
                let dt = datatype.as_deref().unwrap_or(default_dt);
                Some(self.handler.create_typed_literal_node(&lexical, dt))
            }
            Value::String(s) => {
                if let Some(tag) = value.get("@language").and_then(Value::as_str) {
                    return match LanguageTag::new(tag) {
                        Ok(tag) => Some(self.handler.create_lang_literal_node(s, tag)),
                        Err(err) => {
                            self.warnings.warn(&format!("Skipping literal \"{s}\": {err}"));
                            None
                        }
                    };
                }
                match datatype {
                    Some(dt) => Some(self.handler.create_typed_literal_node(s, &dt)),
                    None => Some(self.handler.create_literal_node(s)),
                }
            }
            other => {
                self.warnings
                    .warn(&format!("Skipping value object with @value {other}"));
                None
            }
        }
    }

    fn datatype(&mut self, dt: &str) -> Option<String> {
        if is_absolute_iri(dt) {
            return Some(dt.to_string());
        }
        match resolve_iri(self.base, dt) {
            Ok(iri) => Some(iri),
            Err(err) => {
                self.warnings.warn(&format!("Skipping literal with datatype {err}"));
                None
            }
        }
    }
}

/// The canonical lexical form of a JSON number, and its default datatype.
pub(crate) fn canonical_number(n: &Number, datatype: Option<&str>) -> (String, &'static str) {
    if datatype != Some(xsd::double) && (n.is_i64() || n.is_u64()) {
        return (n.to_string(), xsd::integer);
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() == 0.0 && f.abs() < 1e21 && datatype != Some(xsd::double) {
        if f == 0.0 {
            return ("0".to_string(), xsd::integer);
        }
        return (format!("{f:.0}"), xsd::integer);
    }
    (canonical_double(f), xsd::double)
}

/// The canonical lexical form of an `xsd:double`, e.g. `1.5E2`.
pub(crate) fn canonical_double(f: f64) -> String {
    let txt = format!("{f:E}");
    match txt.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{mantissa}.0E{exponent}")
        }
        _ => txt,
    }
}
