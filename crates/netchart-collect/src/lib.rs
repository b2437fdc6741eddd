//! Node and edge table collection.
//!
//! This crate flattens a [`Graph`](netchart_core::Graph) into the two tables
//! a chart grammar wants: one row per node, and one row per edge endpoint.
//!
//! # Module Structure
//!
//! - [`types`]: Column names, endpoint roles, [`NetworkData`]
//! - [`node`]: Node table builder
//! - [`edge`]: Long-form edge table builder
//! - [`network`]: Layout resolution plus both builders

mod edge;
mod network;
mod node;
mod types;

pub use edge::edge_table;
pub use network::{check_edge_endpoints, network_data};
pub use node::node_table;
pub use types::{EDGE_ID, END, EndRole, NODE_ID, NetworkData, SOURCE, TARGET, X, Y};
