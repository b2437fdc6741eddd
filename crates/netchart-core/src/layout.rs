//! Node positions and the layout argument.
//!
//! A layout is either a precomputed position mapping or a function that
//! computes one from the graph. No layout algorithm lives here; callers
//! plug their own in through [`LayoutFunction`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Attrs, Graph, NodeId, Value};
use netchart_error::{Error, ErrorKind, Result};

/// A 2-D coordinate. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Mapping from node id to position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Positions(HashMap<NodeId, Point>);

impl Positions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<NodeId>, point: impl Into<Point>) -> Option<Point> {
        self.0.insert(id.into(), point.into())
    }

    pub fn get(&self, id: &NodeId) -> Option<Point> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Point)> + '_ {
        self.0.iter()
    }

    /// Read `{"<node id>": [x, y], ...}` for the nodes of `graph`.
    ///
    /// JSON keys are strings, so each key is matched against the display
    /// form of the graph's node ids: `"1"` finds node `1` or node `"1"`,
    /// whichever the graph has. A key naming no node falls back to
    /// [`NodeId::from_key`]. A key that names two nodes is rejected.
    pub fn from_json(doc: &Value, graph: &Graph) -> Result<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| Error::invalid_format("positions must be an object of [x, y] pairs"))?;

        let mut by_key: HashMap<String, Vec<&NodeId>> = HashMap::new();
        for (id, _) in graph.nodes() {
            by_key.entry(id.to_string()).or_default().push(id);
        }

        let mut positions = Self::new();
        for (key, value) in obj {
            let point: Point = serde_json::from_value(value.clone()).map_err(|e| {
                Error::invalid_format(format!("position for '{key}' must be [x, y]"))
                    .with_context("node", key.clone())
                    .set_source(e)
            })?;
            let id = match by_key.get(key).map(Vec::as_slice) {
                Some([id]) => (*id).clone(),
                Some([_, _, ..]) => {
                    return Err(Error::invalid_format(format!(
                        "position key '{key}' matches more than one node"
                    ))
                    .with_operation("positions::from_json")
                    .with_context("node", key.clone()));
                }
                _ => NodeId::from_key(key),
            };
            positions.insert(id, point);
        }
        Ok(positions)
    }

    /// Write positions as a JSON object, keys sorted by node id.
    ///
    /// Ids are written in display form, so `1` and `"1"` share a key;
    /// [`Positions::from_json`] tells them apart again using the graph.
    pub fn to_json(&self) -> Value {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let obj: Attrs = entries
            .into_iter()
            .map(|(id, p)| (id.to_string(), serde_json::json!([p.x, p.y])))
            .collect();
        Value::Object(obj)
    }
}

impl<K, P> FromIterator<(K, P)> for Positions
where
    K: Into<NodeId>,
    P: Into<Point>,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        )
    }
}

/// Pass-through parameters for a layout function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutConfig(Attrs);

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Attrs> for LayoutConfig {
    fn from(attrs: Attrs) -> Self {
        Self(attrs)
    }
}

/// Computes node positions from a graph.
pub trait LayoutFunction {
    fn compute(&self, graph: &Graph, config: &LayoutConfig) -> Result<Positions>;
}

impl<F> LayoutFunction for F
where
    F: Fn(&Graph, &LayoutConfig) -> Result<Positions>,
{
    fn compute(&self, graph: &Graph, config: &LayoutConfig) -> Result<Positions> {
        self(graph, config)
    }
}

/// Where node positions come from.
#[derive(Default)]
pub enum Layout {
    /// No positions; node tables get no `x`/`y` columns.
    #[default]
    None,
    /// Precomputed positions.
    Positions(Positions),
    /// Positions computed from the graph on resolve.
    Compute {
        function: Box<dyn LayoutFunction>,
        config: LayoutConfig,
    },
}

impl Layout {
    pub fn compute<F>(function: F) -> Self
    where
        F: LayoutFunction + 'static,
    {
        Self::compute_with(function, LayoutConfig::new())
    }

    pub fn compute_with<F>(function: F, config: LayoutConfig) -> Self
    where
        F: LayoutFunction + 'static,
    {
        Self::Compute {
            function: Box::new(function),
            config,
        }
    }

    /// Turn the layout into a concrete mapping.
    ///
    /// An empty mapping resolves to `None`, the same as no layout. Whether
    /// the mapping covers every node is not checked here; a missing node
    /// fails later, when its row is built.
    pub fn resolve(self, graph: &Graph) -> Result<Option<Positions>> {
        let positions = match self {
            Self::None => return Ok(None),
            Self::Positions(positions) => positions,
            Self::Compute { function, config } => {
                debug!(nodes = graph.node_count(), "computing layout");
                function.compute(graph, &config).map_err(|e| {
                    if e.kind() == ErrorKind::Unexpected {
                        Error::new(ErrorKind::LayoutFailed, e.message().to_string())
                            .with_operation("layout::resolve")
                            .set_source(e)
                    } else {
                        e.with_operation("layout::resolve")
                    }
                })?
            }
        };
        Ok((!positions.is_empty()).then_some(positions))
    }
}

impl From<Positions> for Layout {
    fn from(positions: Positions) -> Self {
        Self::Positions(positions)
    }
}

impl From<Option<Positions>> for Layout {
    fn from(positions: Option<Positions>) -> Self {
        positions.map_or(Self::None, Self::Positions)
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Positions(p) => f.debug_tuple("Positions").field(&p.len()).finish(),
            Self::Compute { config, .. } => f
                .debug_struct("Compute")
                .field("config", config)
                .finish_non_exhaustive(),
        }
    }
}
