//! [Node map generation](https://www.w3.org/TR/json-ld11-api/#node-map-generation).
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::bnode_gen::BNodeGen;
use crate::error::JsonLdError;

/// The key of the default graph in a [`NodeMap`].
pub const DEFAULT_GRAPH: &str = "@default";

/// A GraphName-to-nodes map
pub type NodeMap = BTreeMap<String, NamedGraph>;

/// A Id-to-node map
pub type NamedGraph = BTreeMap<String, NodeObject>;

/// A Property-to-values map
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeObject {
    pub(crate) types: Vec<String>,
    pub(crate) index: Option<String>,
    pub(crate) properties: BTreeMap<String, Vec<NodeObjectEntry>>,
}

impl NodeObject {
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    pub fn properties(&self) -> &BTreeMap<String, Vec<NodeObjectEntry>> {
        &self.properties
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeObjectEntry {
    Id(String),
    List(Vec<NodeObjectEntry>),
    Value(Map<String, Value>), // always contains @value
}

/// Build the node map of an expanded document.
///
/// Blank node identifiers of the document are relabelled with `bnodes`.
pub fn generate_node_map(expanded: &Value, bnodes: &mut BNodeGen) -> Result<NodeMap, JsonLdError> {
    let mut builder = NodeMapBuilder {
        map: NodeMap::new(),
        bnodes,
    };
    builder.map.insert(DEFAULT_GRAPH.to_string(), NamedGraph::new());
    builder.collect(expanded, DEFAULT_GRAPH)?;
    Ok(builder.map)
}

struct NodeMapBuilder<'g> {
    map: NodeMap,
    bnodes: &'g mut BNodeGen,
}

impl NodeMapBuilder<'_> {
    /// Add the nodes of `element` to `graph`,
    /// and return the entries by which `element` is referenced.
    fn collect(&mut self, element: &Value, graph: &str) -> Result<Vec<NodeObjectEntry>, JsonLdError> {
        match element {
            Value::Array(items) => {
                let mut entries = vec![];
                for item in items {
                    entries.extend(self.collect(item, graph)?);
                }
                Ok(entries)
            }
            Value::Object(obj) => {
                if obj.contains_key("@value") {
                    return Ok(vec![NodeObjectEntry::Value(obj.clone())]);
                }
                if let Some(list) = obj.get("@list") {
                    let items = self.collect(list, graph)?;
                    return Ok(vec![NodeObjectEntry::List(items)]);
                }
                let id = self.node(obj, graph)?;
                Ok(vec![NodeObjectEntry::Id(id)])
            }
            Value::Null => Ok(vec![]),
            other => Err(JsonLdError::NotExpanded(format!(
                "expected an object or an array, found {other}"
            ))),
        }
    }

    fn node(&mut self, obj: &Map<String, Value>, graph: &str) -> Result<String, JsonLdError> {
        let id = match obj.get("@id") {
            Some(Value::String(id)) => self.identifier(id),
            Some(other) => {
                return Err(JsonLdError::NotExpanded(format!(
                    "@id must be a string, found {other}"
                )))
            }
            None => self.bnodes.fresh(),
        };
        self.node_mut(graph, &id);

        if let Some(types) = obj.get("@type") {
            for ty in as_slice(types) {
                let Value::String(ty) = ty else {
                    return Err(JsonLdError::NotExpanded(format!(
                        "@type must contain strings, found {ty}"
                    )));
                };
                let ty = self.identifier(ty);
                let node = self.node_mut(graph, &id);
                if !node.types.contains(&ty) {
                    node.types.push(ty);
                }
            }
        }

        if let Some(index) = obj.get("@index") {
            let Value::String(index) = index else {
                return Err(JsonLdError::NotExpanded(format!(
                    "@index must be a string, found {index}"
                )));
            };
            let node = self.node_mut(graph, &id);
            match &node.index {
                Some(existing) if existing != index => {
                    return Err(JsonLdError::ConflictingIndexes(id));
                }
                _ => node.index = Some(index.clone()),
            }
        }

        if let Some(reverse) = obj.get("@reverse") {
            let Value::Object(reverse) = reverse else {
                return Err(JsonLdError::NotExpanded(format!(
                    "@reverse must be an object, found {reverse}"
                )));
            };
            for (property, values) in reverse {
                let property = self.identifier(property);
                for entry in self.collect(values, graph)? {
                    let NodeObjectEntry::Id(referencing) = entry else {
                        return Err(JsonLdError::InvalidReversePropertyValue(property));
                    };
                    self.add_value(graph, &referencing, &property, NodeObjectEntry::Id(id.clone()));
                }
            }
        }

        if let Some(named) = obj.get("@graph") {
            self.map.entry(id.clone()).or_default();
            self.collect(named, &id)?;
        }

        if let Some(included) = obj.get("@included") {
            self.collect(included, graph)?;
        }

        for (key, values) in obj {
            if key.starts_with('@') {
                continue;
            }
            let property = self.identifier(key);
            self.node_mut(graph, &id)
                .properties
                .entry(property.clone())
                .or_default();
            for entry in self.collect(values, graph)? {
                self.add_value(graph, &id, &property, entry);
            }
        }
        Ok(id)
    }

    /// Relabel blank node identifiers; keep IRIs as is.
    fn identifier(&mut self, id: &str) -> String {
        if id.starts_with("_:") {
            self.bnodes.get(id)
        } else {
            id.to_string()
        }
    }

    fn node_mut(&mut self, graph: &str, id: &str) -> &mut NodeObject {
        self.map
            .entry(graph.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default()
    }

    fn add_value(&mut self, graph: &str, subject: &str, property: &str, entry: NodeObjectEntry) {
        let values = self
            .node_mut(graph, subject)
            .properties
            .entry(property.to_string())
            .or_default();
        // lists are never merged
        if matches!(entry, NodeObjectEntry::List(_)) || !values.contains(&entry) {
            values.push(entry);
        }
    }
}

fn as_slice(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}
