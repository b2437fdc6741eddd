//! Output generation.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;

use netchart_chart::{ChartConfig, NetworkStyle, network_chart};
use netchart_collect::NetworkData;
use netchart_core::{Error, ErrorKind, Result};

use crate::options::OutputFormat;

/// Render the collected tables in the requested format.
pub fn render(
    data: NetworkData,
    format: OutputFormat,
    config: &ChartConfig,
    style: &NetworkStyle,
) -> Result<Value> {
    let (nodes, edges) = data.into_parts();
    match format {
        OutputFormat::Nodes => to_value(&nodes),
        OutputFormat::Edges => to_value(&edges),
        OutputFormat::Tables => Ok(json!({
            "nodes": to_value(&nodes)?,
            "edges": to_value(&edges)?,
        })),
        OutputFormat::VegaLite => {
            let chart = network_chart(Arc::new(nodes), Arc::new(edges), style);
            let spec = chart.to_vega_lite(config)?;
            info!(layers = chart.layer.len(), "rendered vega-lite spec");
            Ok(spec)
        }
    }
}

fn to_value(table: &netchart_core::Table) -> Result<Value> {
    serde_json::to_value(table).map_err(|e| {
        Error::new(ErrorKind::SerializationFailed, e.to_string())
            .with_operation("output::render")
            .set_source(e)
    })
}
