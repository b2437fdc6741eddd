//! Node table builder.

use tracing::debug;

use netchart_core::{Attrs, Error, Graph, Positions, Result, Table, Value};

use crate::types::{NODE_ID, X, Y};

/// Build the node table: one row per node, in graph order.
///
/// Columns are the union of node attribute keys plus `node_id`. With
/// `positions`, `x` and `y` are filled from the mapping, replacing any
/// `x`/`y` attributes. Every node must have a finite position when
/// `positions` is given.
pub fn node_table(graph: &Graph, positions: Option<&Positions>) -> Result<Table> {
    let mut records = Vec::with_capacity(graph.node_count());
    for (id, attrs) in graph.nodes() {
        if attrs.contains_key(NODE_ID) {
            return Err(Error::reserved_column(NODE_ID)
                .with_operation("collect::node_table")
                .with_context("node", id.to_string()));
        }
        let mut record: Attrs = attrs.clone();
        record.insert(NODE_ID.to_string(), id.to_value());
        records.push(record);
    }

    let mut table = if records.is_empty() {
        Table::new([NODE_ID])?
    } else {
        Table::from_records(records)
    };

    if let Some(positions) = positions {
        let mut xs = Vec::with_capacity(table.len());
        let mut ys = Vec::with_capacity(table.len());
        for (id, _) in graph.nodes() {
            let point = positions.get(id).ok_or_else(|| {
                Error::position_not_found(id.to_string())
                    .with_operation("collect::node_table")
                    .with_context("positions", positions.len().to_string())
            })?;
            if !(point.x.is_finite() && point.y.is_finite()) {
                return Err(Error::invalid_argument(format!(
                    "position ({}, {}) for node '{}' is not finite",
                    point.x, point.y, id
                ))
                .with_operation("collect::node_table")
                .with_context("node", id.to_string()));
            }
            xs.push(Value::from(point.x));
            ys.push(Value::from(point.y));
        }
        table.set_column(X, xs)?;
        table.set_column(Y, ys)?;
    }

    debug!(
        rows = table.len(),
        columns = table.columns().len(),
        positioned = positions.is_some(),
        "built node table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netchart_core::{ErrorKind, attrs};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn graph() -> Graph {
        let mut g = Graph::undirected();
        g.add_node("A", attrs([("group", 1)]));
        g.add_node("B", attrs([("label", "bee")]));
        g.add_edge("A", "B", Attrs::new());
        g
    }

    #[test]
    fn test_columns_are_attribute_union_plus_id() {
        let table = node_table(&graph(), None).unwrap();
        assert_eq!(table.columns(), ["group", "node_id", "label"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "label"), Some(&Value::Null));
        assert_eq!(table.cell(1, NODE_ID), Some(&json!("B")));
    }

    #[test]
    fn test_no_positions_means_no_coordinates() {
        let table = node_table(&graph(), None).unwrap();
        assert!(!table.has_column(X));
        assert!(!table.has_column(Y));
    }

    #[test]
    fn test_positions_fill_coordinates() {
        let positions: Positions = [("A", (0.5, 1.0)), ("B", (-1.0, 2.0))].into_iter().collect();
        let table = node_table(&graph(), Some(&positions)).unwrap();

        assert_eq!(table.column(X).unwrap(), [&json!(0.5), &json!(-1.0)]);
        assert_eq!(table.column(Y).unwrap(), [&json!(1.0), &json!(2.0)]);
    }

    #[test]
    fn test_missing_position_fails() {
        let positions: Positions = [("A", (0.0, 0.0))].into_iter().collect();
        let err = node_table(&graph(), Some(&positions)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PositionNotFound);
        assert_eq!(err.context_value("node"), Some("B"));
    }

    #[test]
    fn test_reserved_attribute_names() {
        let mut g = Graph::directed();
        g.add_node("A", attrs([("node_id", "other")]));
        let err = node_table(&g, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservedColumn);
        assert_eq!(err.context_value("column"), Some("node_id"));
        assert_eq!(err.context_value("node"), Some("A"));

        let mut g = Graph::directed();
        g.add_node("A", attrs([("x", 3)]));
        assert_eq!(node_table(&g, None).unwrap().cell(0, X), Some(&json!(3)));
    }

    #[test]
    fn test_positions_replace_coordinate_attributes() {
        let mut g = Graph::directed();
        g.add_node("A", attrs([("x", 5.0), ("y", 6.0)]));
        g.add_node("B", attrs([("group", 1)]));
        let positions: Positions = [("A", (0.0, 1.0)), ("B", (2.0, 3.0))].into_iter().collect();

        let table = node_table(&g, Some(&positions)).unwrap();
        assert_eq!(table.columns(), ["x", "y", "node_id", "group"]);
        assert_eq!(table.column(X).unwrap(), [&json!(0.0), &json!(2.0)]);
        assert_eq!(table.column(Y).unwrap(), [&json!(1.0), &json!(3.0)]);
    }

    #[test]
    fn test_non_finite_position_fails() {
        let positions: Positions = [("A", (0.0, 0.0)), ("B", (f64::NAN, 1.0))].into_iter().collect();
        let err = node_table(&graph(), Some(&positions)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.context_value("node"), Some("B"));

        let positions: Positions = [("A", (f64::INFINITY, 0.0)), ("B", (0.0, 0.0))]
            .into_iter()
            .collect();
        let err = node_table(&graph(), Some(&positions)).unwrap_err();
        assert_eq!(err.context_value("node"), Some("A"));
    }

    #[test]
    fn test_empty_graph_keeps_id_column() {
        let table = node_table(&Graph::directed(), None).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), [NODE_ID]);
    }
}
