use std::fs;
use std::sync::Arc;

use netchart_chart::{
    ChartConfig, Encoding, FieldChannel, MarkProps, NetworkStyle, base_layers, network_chart,
};
use netchart_collect::network_data;
use netchart_core::{Attrs, ErrorKind, Graph, Positions, attrs};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn triangle() -> (Graph, Positions) {
    let mut g = Graph::undirected();
    g.add_edge("A", "B", attrs([("weight", 1)]));
    g.add_edge("B", "C", attrs([("weight", 2)]));
    g.add_edge("C", "A", Attrs::new());
    let positions = [("A", (0.0, 0.0)), ("B", (1.0, 0.0)), ("C", (0.5, 1.0))]
        .into_iter()
        .collect();
    (g, positions)
}

fn layered_spec(config: &ChartConfig) -> netchart_core::Result<Value> {
    let (g, positions) = triangle();
    let (nodes, edges) = network_data(&g, positions)?.into_parts();
    let (node_base, edge_base) = base_layers(Arc::new(nodes), Arc::new(edges));

    let edges = edge_base.mark_line(MarkProps::new().color("gray"));
    let nodes = node_base.clone().mark_circle(MarkProps::new().size(300.0));
    let labels = node_base
        .mark_text(MarkProps::new())
        .encode(Encoding::new().text(FieldChannel::nominal("node_id")));
    (edges + nodes + labels).to_vega_lite(config)
}

#[test]
fn layered_network_spec() {
    let spec = layered_spec(&ChartConfig::default()).unwrap();

    assert_eq!(
        spec["$schema"],
        json!("https://vega.github.io/schema/vega-lite/v5.json")
    );
    let layers = spec["layer"].as_array().unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0]["mark"], json!({"type": "line", "color": "gray"}));
    assert_eq!(layers[1]["mark"], json!({"type": "circle", "size": 300.0}));
    assert_eq!(
        layers[0]["encoding"],
        json!({
            "x": {"field": "x", "type": "quantitative", "axis": null},
            "y": {"field": "y", "type": "quantitative", "axis": null},
            "detail": {"field": "edge_id", "type": "nominal"}
        })
    );
    assert_eq!(
        layers[0]["transform"],
        json!([{
            "lookup": "node_id",
            "from": {"data": {"name": "data-1"}, "key": "node_id", "fields": ["x", "y"]}
        }])
    );
    assert_eq!(layers[2]["encoding"]["text"], json!({"field": "node_id", "type": "nominal"}));

    let edge_rows = spec["datasets"]["data-0"].as_array().unwrap();
    let node_rows = spec["datasets"]["data-1"].as_array().unwrap();
    assert_eq!(edge_rows.len(), 6);
    assert_eq!(node_rows.len(), 3);
    assert_eq!(node_rows[0], json!({"node_id": "A", "x": 0.0, "y": 0.0}));
}

#[test]
fn inline_datasets_when_not_consolidating() {
    let config = ChartConfig {
        consolidate_datasets: false,
        ..ChartConfig::default()
    };
    let spec = layered_spec(&config).unwrap();

    assert!(spec.get("datasets").is_none());
    assert_eq!(spec["layer"][1]["data"]["values"].as_array().unwrap().len(), 3);
    assert_eq!(
        spec["layer"][0]["transform"][0]["from"]["data"]["values"][2],
        json!({"node_id": "C", "x": 0.5, "y": 1.0})
    );
}

#[test]
fn row_limit_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.toml");
    fs::write(&path, "max_rows = 4\nwidth = 500\n").unwrap();

    let config = ChartConfig::from_path(&path).unwrap();
    assert_eq!(config.width, Some(500));

    // six edge rows exceed the limit, three node rows do not
    let err = layered_spec(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MaxRowsExceeded);
    assert_eq!(err.context_value("layer"), Some("0"));
}

#[test]
fn bad_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.toml");
    fs::write(&path, "max_rowz = 4\n").unwrap();

    let err = ChartConfig::from_path(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

    let missing = ChartConfig::from_path(dir.path().join("nope.toml")).unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::FileNotFound);
}

#[test]
fn network_chart_matches_manual_layers() {
    let (g, positions) = triangle();
    let (nodes, edges) = network_data(&g, positions).unwrap().into_parts();
    let config = ChartConfig::default();

    let composed = network_chart(Arc::new(nodes), Arc::new(edges), &NetworkStyle::default())
        .to_vega_lite(&config)
        .unwrap();
    assert_eq!(composed, layered_spec(&config).unwrap());
}
