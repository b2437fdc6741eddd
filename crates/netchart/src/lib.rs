//! netchart command-line interface.
//!
pub mod options;
pub mod output;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use netchart_chart::{ChartConfig, NetworkStyle};
use netchart_collect::{check_edge_endpoints, network_data};
use netchart_core::{Error, Graph, Layout, Positions, Result};

pub use options::{OutputFormat, StyleOptions};

/// Options for running netchart.
#[derive(Debug, Clone, Default)]
pub struct NetchartOptions {
    /// Node-link JSON graph.
    pub graph: PathBuf,
    /// `{"<node id>": [x, y]}` JSON positions.
    pub positions: Option<PathBuf>,
    /// TOML chart settings.
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    /// Fail when an edge endpoint has no node row.
    pub strict: bool,
    pub style: StyleOptions,
}

/// Main entry point. Returns the pretty-printed JSON output.
pub fn run_main(opts: &NetchartOptions) -> Result<String> {
    let graph = Graph::from_node_link(&read_json(&opts.graph)?)
        .map_err(|e| e.with_context("path", opts.graph.display().to_string()))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );

    let layout = match &opts.positions {
        Some(path) => {
            let positions = Positions::from_json(&read_json(path)?, &graph)
                .map_err(|e| e.with_context("path", path.display().to_string()))?;
            Layout::from(positions)
        }
        None => Layout::None,
    };

    let config = match &opts.config {
        Some(path) => ChartConfig::from_path(path)?,
        None => ChartConfig::default(),
    };

    let data = network_data(&graph, layout)?;
    if opts.strict {
        check_edge_endpoints(&data)?;
    }

    let value = output::render(data, opts.format, &config, &NetworkStyle::from(&opts.style))?;
    serde_json::to_string_pretty(&value).map_err(|e| {
        Error::new(netchart_core::ErrorKind::SerializationFailed, e.to_string())
            .with_operation("run_main")
            .set_source(e)
    })
}

fn read_json(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "reading json");
    let text = fs::read_to_string(path)
        .map_err(|e| Error::from(e).with_context("path", path.display().to_string()))?;
    serde_json::from_str(&text).map_err(|e| {
        Error::invalid_format(format!("{}: {e}", path.display()))
            .with_operation("read_json")
            .with_context("path", path.display().to_string())
            .set_source(e)
    })
}
