//! Graph model and table primitives for netchart.
//!
//! - [`graph`]: attribute-bearing graph backed by petgraph
//! - [`id`]: node identifiers
//! - [`layout`]: positions and the layout argument
//! - [`table`]: row-major table with the reshaping operations the
//!   collectors need (record union, index column, melt)

pub mod graph;
pub mod id;
pub mod layout;
pub mod table;

pub use graph::{EdgeView, Graph, NodeData, attrs};
pub use id::NodeId;
pub use layout::{Layout, LayoutConfig, LayoutFunction, Point, Positions};
pub use netchart_error::{Error, ErrorKind, Result};
pub use table::Table;

/// Attribute value attached to nodes, edges and table cells.
pub type Value = serde_json::Value;

/// Ordered attribute mapping.
pub type Attrs = serde_json::Map<String, Value>;
