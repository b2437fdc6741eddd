//! Core types for table collection.

use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

use netchart_core::Table;

// Column names

/// Node identifier column, shared by both tables.
pub const NODE_ID: &str = "node_id";
/// Sequential edge identifier column.
pub const EDGE_ID: &str = "edge_id";
/// Endpoint role column in the long edge table.
pub const END: &str = "end";
pub const SOURCE: &str = "source";
pub const TARGET: &str = "target";
pub const X: &str = "x";
pub const Y: &str = "y";

/// Which endpoint of an edge a long-form row stands for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum EndRole {
    Source,
    Target,
}

impl EndRole {
    pub const ALL: [EndRole; 2] = [EndRole::Source, EndRole::Target];

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// The node table and long-form edge table of one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkData {
    pub nodes: Table,
    pub edges: Table,
}

impl NetworkData {
    pub fn into_parts(self) -> (Table, Table) {
        (self.nodes, self.edges)
    }
}
