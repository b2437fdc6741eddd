//! Command-line options shared by the netchart binary and its tests.

use clap::{Args, ValueEnum};

use netchart_chart::NetworkStyle;

/// What to print.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Node table as a JSON array of records.
    Nodes,
    /// Long-form edge table as a JSON array of records.
    Edges,
    /// Both tables: `{"nodes": [...], "edges": [...]}`.
    Tables,
    /// Layered Vega-Lite spec (edges, nodes, labels).
    #[default]
    VegaLite,
}

/// Styling of the layered chart.
#[derive(Args, Debug, Clone)]
pub struct StyleOptions {
    /// Edge line color.
    #[arg(long = "edge-color", default_value = "gray")]
    pub edge_color: String,

    /// Node circle area in square pixels.
    #[arg(long = "node-size", default_value_t = 300.0)]
    pub node_size: f64,

    /// Node circle color (renderer default when unset).
    #[arg(long = "node-color")]
    pub node_color: Option<String>,

    /// Leave out the node id labels.
    #[arg(long = "no-labels")]
    pub no_labels: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            edge_color: "gray".to_string(),
            node_size: 300.0,
            node_color: None,
            no_labels: false,
        }
    }
}

impl From<&StyleOptions> for NetworkStyle {
    fn from(opts: &StyleOptions) -> Self {
        NetworkStyle {
            edge_color: opts.edge_color.clone(),
            node_size: opts.node_size,
            node_color: opts.node_color.clone(),
            labels: !opts.no_labels,
        }
    }
}
