//! Attribute-bearing graph.
//!
//! Nodes and edges keep insertion order, which is the row order every
//! table built from the graph inherits. Edge endpoints are always members
//! of the node set: adding an edge adds any missing endpoint.

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use tracing::debug;

use crate::{Attrs, NodeId, Value};
use netchart_error::{Error, Result};

/// Build an attribute mapping from key/value pairs.
pub fn attrs<K, V, I>(pairs: I) -> Attrs
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Node payload stored in the underlying petgraph graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub id: NodeId,
    pub attrs: Attrs,
}

/// Read-only view of an edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub source: &'a NodeId,
    pub target: &'a NodeId,
    pub attrs: &'a Attrs,
}

/// Graph with arbitrary key/value attributes on nodes and edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: StableGraph<NodeData, Attrs>,
    index: HashMap<NodeId, NodeIndex>,
    directed: bool,
    multigraph: bool,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    /// Graph that keeps parallel edges instead of merging them.
    pub fn new_multi(directed: bool) -> Self {
        Self {
            directed,
            multigraph: true,
            ..Self::default()
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.multigraph
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_attrs(&self, id: &NodeId) -> Option<&Attrs> {
        self.index.get(id).map(|&ix| &self.inner[ix].attrs)
    }

    /// Add a node, or merge `attrs` into an existing node's attributes.
    /// An existing node keeps its position in node order.
    pub fn add_node(&mut self, id: impl Into<NodeId>, attrs: Attrs) -> NodeIndex {
        let id = id.into();
        if let Some(&ix) = self.index.get(&id) {
            self.inner[ix].attrs.extend(attrs);
            return ix;
        }
        let ix = self.inner.add_node(NodeData {
            id: id.clone(),
            attrs,
        });
        self.index.insert(id, ix);
        ix
    }

    /// Add an edge, adding missing endpoints with empty attributes.
    ///
    /// Outside multigraphs an existing edge has `attrs` merged into it;
    /// for undirected graphs `(u, v)` and `(v, u)` are the same edge.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        attrs: Attrs,
    ) -> EdgeIndex {
        let a = self.add_node(source, Attrs::new());
        let b = self.add_node(target, Attrs::new());

        if !self.multigraph
            && let Some(ix) = self.find_edge(a, b)
        {
            self.inner[ix].extend(attrs);
            return ix;
        }
        self.inner.add_edge(a, b, attrs)
    }

    fn find_edge(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        let forward = self.inner.find_edge(a, b);
        if self.directed {
            forward
        } else {
            forward.or_else(|| self.inner.find_edge(b, a))
        }
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &Attrs)> + '_ {
        self.inner.node_indices().map(|ix| {
            let node = &self.inner[ix];
            (&node.id, &node.attrs)
        })
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.inner.edge_indices().filter_map(|ix| {
            let (a, b) = self.inner.edge_endpoints(ix)?;
            Some(EdgeView {
                source: &self.inner[a].id,
                target: &self.inner[b].id,
                attrs: &self.inner[ix],
            })
        })
    }

    /// Read a node-link JSON document.
    ///
    /// ```json
    /// {"directed": true, "multigraph": false,
    ///  "nodes": [{"id": "A", "color": "red"}],
    ///  "links": [{"source": "A", "target": "B", "weight": 5}]}
    /// ```
    ///
    /// `edges` is accepted in place of `links`.
    pub fn from_node_link(doc: &Value) -> Result<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| Error::invalid_format("node-link document must be an object"))?;

        let directed = read_flag(obj, "directed")?;
        let multigraph = read_flag(obj, "multigraph")?;
        let mut graph = if multigraph {
            Self::new_multi(directed)
        } else {
            Self::new(directed)
        };

        for (i, node) in read_list(obj, "nodes")?.iter().enumerate() {
            let entry = node
                .as_object()
                .ok_or_else(|| entry_error("nodes", i, "entry must be an object"))?;
            let id = entry
                .get("id")
                .ok_or_else(|| entry_error("nodes", i, "missing 'id'"))?;
            let id = NodeId::from_value(id).map_err(|e| e.with_context("entry", i.to_string()))?;
            graph.add_node(id, fields_except(entry, &["id"]));
        }

        let links = match obj.get("links") {
            Some(_) => read_list(obj, "links")?,
            None => read_list(obj, "edges")?,
        };
        // A multigraph's `key` is an edge key, not an attribute.
        let reserved: &[&str] = if multigraph {
            &["source", "target", "key"]
        } else {
            &["source", "target"]
        };
        for (i, link) in links.iter().enumerate() {
            let entry = link
                .as_object()
                .ok_or_else(|| entry_error("links", i, "entry must be an object"))?;
            let source = entry
                .get("source")
                .ok_or_else(|| entry_error("links", i, "missing 'source'"))?;
            let target = entry
                .get("target")
                .ok_or_else(|| entry_error("links", i, "missing 'target'"))?;
            graph.add_edge(
                NodeId::from_value(source)?,
                NodeId::from_value(target)?,
                fields_except(entry, reserved),
            );
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed,
            "loaded node-link graph"
        );
        Ok(graph)
    }

    /// Write the graph as a node-link JSON document.
    pub fn to_node_link(&self) -> Value {
        let nodes: Vec<Value> = self
            .nodes()
            .map(|(id, attrs)| {
                let mut entry = Attrs::new();
                entry.insert("id".to_string(), id.to_value());
                entry.extend(attrs.clone());
                Value::Object(entry)
            })
            .collect();

        let links: Vec<Value> = self
            .edges()
            .map(|edge| {
                let mut entry = Attrs::new();
                entry.insert("source".to_string(), edge.source.to_value());
                entry.insert("target".to_string(), edge.target.to_value());
                entry.extend(edge.attrs.clone());
                Value::Object(entry)
            })
            .collect();

        serde_json::json!({
            "directed": self.directed,
            "multigraph": self.multigraph,
            "nodes": nodes,
            "links": links,
        })
    }
}

fn fields_except(entry: &Attrs, skip: &[&str]) -> Attrs {
    entry
        .iter()
        .filter(|(k, _)| !skip.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn read_flag(obj: &Attrs, key: &str) -> Result<bool> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(Error::invalid_format(format!(
            "'{key}' must be a boolean, got {other}"
        ))),
    }
}

fn read_list<'a>(obj: &'a Attrs, key: &str) -> Result<&'a [Value]> {
    match obj.get(key) {
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(Error::invalid_format(format!("'{key}' must be an array"))),
    }
}

fn entry_error(list: &'static str, index: usize, message: &str) -> Error {
    Error::invalid_format(message.to_string())
        .with_context("list", list)
        .with_context("entry", index.to_string())
}
