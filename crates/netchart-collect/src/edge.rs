//! Long-form edge table builder.

use tracing::debug;

use netchart_core::{Attrs, Error, Graph, Result, Table};

use crate::types::{EDGE_ID, END, EndRole, NODE_ID, SOURCE, TARGET};

const RESERVED: [&str; 5] = [EDGE_ID, SOURCE, TARGET, END, NODE_ID];

/// Build the wide edge table: `edge_id`, `source`, `target`, then the
/// union of edge attribute keys. Edge ids count from 0 in graph order.
fn wide_edge_table(graph: &Graph) -> Result<Table> {
    let mut records = Vec::with_capacity(graph.edge_count());
    for (i, edge) in graph.edges().enumerate() {
        if let Some(key) = edge.attrs.keys().find(|k| RESERVED.contains(&k.as_str())) {
            return Err(Error::reserved_column(key.as_str())
                .with_operation("collect::edge_table")
                .with_context("edge", i.to_string()));
        }
        let mut record = Attrs::new();
        record.insert(SOURCE.to_string(), edge.source.to_value());
        record.insert(TARGET.to_string(), edge.target.to_value());
        record.extend(edge.attrs.clone());
        records.push(record);
    }

    let mut table = if records.is_empty() {
        Table::new([SOURCE, TARGET])?
    } else {
        Table::from_records(records)
    };
    table.insert_index_column(EDGE_ID)?;
    Ok(table)
}

/// Build the long-form edge table: two rows per edge.
///
/// Each edge yields a `source` row and a `target` row, tagged in `end`,
/// with the endpoint in `node_id`. Both rows carry the same `edge_id` and
/// attribute values, so grouping on `edge_id` recovers one line per edge.
/// All `source` rows come first, then all `target` rows.
pub fn edge_table(graph: &Graph) -> Result<Table> {
    let wide = wide_edge_table(graph)?;

    let id_vars: Vec<&str> = wide
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| *c != SOURCE && *c != TARGET)
        .collect();
    let roles = EndRole::ALL.map(|role| role.as_str());

    let long = wide
        .melt(&id_vars, &roles, END, NODE_ID)
        .map_err(|e| e.with_operation("collect::edge_table"))?;

    debug!(
        edges = wide.len(),
        rows = long.len(),
        "built edge table"
    );
    Ok(long)
}
