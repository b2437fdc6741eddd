//! Layout resolution plus both table builders.

use std::collections::HashSet;

use tracing::{debug, info};

use netchart_core::{Error, ErrorKind, Graph, Layout, Result, Value};

use crate::edge::edge_table;
use crate::node::node_table;
use crate::types::{NODE_ID, NetworkData};

/// Build the node and edge tables for `graph`.
///
/// `layout` is resolved first: a [`Layout::Compute`] runs its function on
/// the graph, precomputed positions are used as is, and no layout (or an
/// empty mapping) leaves the node table without coordinates.
pub fn network_data(graph: &Graph, layout: impl Into<Layout>) -> Result<NetworkData> {
    let positions = layout
        .into()
        .resolve(graph)
        .map_err(|e| e.with_operation("collect::network_data"))?;

    let nodes = node_table(graph, positions.as_ref())?;
    let edges = edge_table(graph)?;

    info!(
        nodes = nodes.len(),
        edge_rows = edges.len(),
        positioned = positions.is_some(),
        "collected network data"
    );
    Ok(NetworkData { nodes, edges })
}

/// Check that every `node_id` in the edge table has a row in the node table.
///
/// [`network_data`] never calls this: a dangling endpoint otherwise
/// surfaces only when the chart's lookup finds no coordinates for it.
pub fn check_edge_endpoints(data: &NetworkData) -> Result<()> {
    let missing_column = |table: &'static str| {
        Error::column_not_found(NODE_ID)
            .with_operation("collect::check_edge_endpoints")
            .with_context("table", table)
    };
    // Keyed by JSON text so `1` and `"1"` stay distinct.
    let known: HashSet<String> = data
        .nodes
        .column(NODE_ID)
        .ok_or_else(|| missing_column("nodes"))?
        .into_iter()
        .map(Value::to_string)
        .collect();
    let endpoints = data
        .edges
        .column(NODE_ID)
        .ok_or_else(|| missing_column("edges"))?;

    for (row, endpoint) in endpoints.into_iter().enumerate() {
        if !known.contains(&endpoint.to_string()) {
            debug!(row, %endpoint, "dangling edge endpoint");
            return Err(Error::new(
                ErrorKind::DanglingEndpoint,
                format!("edge endpoint {endpoint} has no node row"),
            )
            .with_operation("collect::check_edge_endpoints")
            .with_context("row", row.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use netchart_core::{Attrs, LayoutConfig, Positions, Table, attrs};
    use serde_json::json;

    fn graph() -> Graph {
        let mut g = Graph::directed();
        g.add_edge("A", "B", attrs([("weight", 5)]));
        g
    }

    #[test]
    fn test_no_layout() {
        let data = network_data(&graph(), Layout::None).unwrap();
        assert_eq!(data.nodes.len(), 2);
        assert!(!data.nodes.has_column("x"));
        assert_eq!(data.edges.len(), 2);
    }

    #[test]
    fn test_layout_error_propagates() {
        let failing = |_: &Graph, _: &LayoutConfig| -> Result<Positions> {
            Err(Error::new(ErrorKind::LayoutFailed, "no convergence"))
        };
        let err = network_data(&graph(), Layout::compute(failing)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LayoutFailed);
        assert_eq!(err.operation(), "collect::network_data");
    }

    #[test]
    fn test_check_edge_endpoints() {
        let data = network_data(&graph(), None::<Positions>).unwrap();
        assert!(check_edge_endpoints(&data).is_ok());

        let mut edges = Table::new(["edge_id", "end", "node_id"]).unwrap();
        edges
            .push_row(vec![json!(0), json!("source"), json!("Z")])
            .unwrap();
        let broken = NetworkData {
            nodes: data.nodes.clone(),
            edges,
        };
        let err = check_edge_endpoints(&broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DanglingEndpoint);
        assert_eq!(err.context_value("row"), Some("0"));

        let no_ids = NetworkData {
            nodes: Table::from_records([Attrs::new()]),
            edges: data.edges,
        };
        assert_eq!(
            check_edge_endpoints(&no_ids).unwrap_err().kind(),
            ErrorKind::ColumnNotFound
        );
    }
}
