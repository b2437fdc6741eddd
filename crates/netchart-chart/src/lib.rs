//! Vega-Lite chart layers for netchart tables.
//!
//! Charts here are inert declarative objects. [`base_layers`] binds the
//! node and edge tables to two charts sharing one positional encoding; the
//! caller adds marks and layers them, then serializes with
//! [`Chart::to_vega_lite`] or [`LayerChart::to_vega_lite`].
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use netchart_chart::{ChartConfig, Encoding, FieldChannel, MarkProps, base_layers};
//! # fn demo(nodes: netchart_core::Table, edges: netchart_core::Table) -> netchart_core::Result<()> {
//! let (node_base, edge_base) = base_layers(Arc::new(nodes), Arc::new(edges));
//!
//! let edges = edge_base.mark_line(MarkProps::new().color("gray"));
//! let nodes = node_base.clone().mark_circle(MarkProps::new().size(300.0));
//! let labels = node_base
//!     .mark_text(MarkProps::new())
//!     .encode(Encoding::new().text(FieldChannel::nominal("node_id")));
//!
//! let spec = (edges + nodes + labels).to_vega_lite(&ChartConfig::default())?;
//! # Ok(())
//! # }
//! ```

mod chart;
mod config;
mod encoding;
mod layers;
mod mark;

pub use chart::{Chart, Data, LayerChart, LookupData, Transform};
pub use config::ChartConfig;
pub use encoding::{Axis, Encoding, FieldChannel, FieldType, PositionChannel};
pub use layers::{NetworkStyle, base_layers, network_chart};
pub use mark::{Mark, MarkProps, MarkType};
