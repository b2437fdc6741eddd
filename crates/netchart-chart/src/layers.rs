//! Base layers for drawing a network from its node and edge tables.

use std::sync::Arc;

use tracing::{debug, warn};

use netchart_collect::{EDGE_ID, NODE_ID, X, Y};
use netchart_core::Table;

use crate::chart::{Chart, LayerChart, LookupData};
use crate::encoding::{Encoding, FieldChannel, PositionChannel};
use crate::mark::MarkProps;

/// Two charts sharing one positional encoding: nodes first, then edges.
///
/// Neither chart has a mark. The edge chart looks up `x`/`y` for each of
/// its rows from the node table by `node_id`, and groups rows by `edge_id`
/// so a line mark draws one segment per edge.
pub fn base_layers(nodes: Arc<Table>, edges: Arc<Table>) -> (Chart, Chart) {
    if !(nodes.has_column(X) && nodes.has_column(Y)) {
        warn!(
            nodes = nodes.len(),
            "node table has no x/y columns; charts will have nothing to place"
        );
    }

    let position = Encoding::new()
        .x(PositionChannel::quantitative(X).hide_axis())
        .y(PositionChannel::quantitative(Y).hide_axis());

    let node_chart = Chart::new(Arc::clone(&nodes)).encode(position.clone());
    let edge_chart = Chart::new(edges)
        .encode(position)
        .encode(Encoding::new().detail(FieldChannel::nominal(EDGE_ID)))
        .transform_lookup(NODE_ID, LookupData::new(nodes, NODE_ID, [X, Y]));

    (node_chart, edge_chart)
}

/// Styling for [`network_chart`].
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStyle {
    pub edge_color: String,
    pub node_size: f64,
    pub node_color: Option<String>,
    /// Draw each node's id next to it.
    pub labels: bool,
}

impl Default for NetworkStyle {
    fn default() -> Self {
        Self {
            edge_color: "gray".to_string(),
            node_size: 300.0,
            node_color: None,
            labels: true,
        }
    }
}

/// Edges as lines under filled circles, optionally with text labels.
pub fn network_chart(nodes: Arc<Table>, edges: Arc<Table>, style: &NetworkStyle) -> LayerChart {
    let (node_base, edge_base) = base_layers(nodes, edges);

    let mut circle = MarkProps::new().size(style.node_size);
    if let Some(color) = &style.node_color {
        circle = circle.color(color.clone());
    }

    let mut layered = edge_base.mark_line(MarkProps::new().color(style.edge_color.clone()))
        + node_base.clone().mark_circle(circle);
    if style.labels {
        layered = layered + node_base
            .mark_text(MarkProps::new())
            .encode(Encoding::new().text(FieldChannel::nominal(NODE_ID)));
    }
    debug!(layers = layered.layer.len(), "assembled network chart");
    layered
}
