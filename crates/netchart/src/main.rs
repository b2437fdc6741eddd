use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use netchart::{NetchartOptions, OutputFormat, StyleOptions, run_main};

#[derive(Parser, Debug)]
#[command(
    name = "netchart",
    about = "netchart: graph to node and edge tables for Vega-Lite",
    version
)]
pub struct Cli {
    /// Node-link JSON graph file
    #[arg(short = 'g', long = "graph", value_name = "FILE")]
    graph: PathBuf,

    /// Node positions as a JSON object of [x, y] pairs
    #[arg(short = 'p', long = "positions", value_name = "FILE")]
    positions: Option<PathBuf>,

    /// What to print
    #[arg(long, value_enum, default_value_t = OutputFormat::VegaLite)]
    format: OutputFormat,

    /// Chart settings (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Check that every edge endpoint has a node row before output
    #[arg(long, default_value_t = false)]
    strict: bool,

    #[command(flatten)]
    style: StyleOptions,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = NetchartOptions {
        graph: args.graph,
        positions: args.positions,
        config: args.config,
        format: args.format,
        strict: args.strict,
        style: args.style,
    };

    let output = run_main(&opts).with_context(|| format!("processing {}", opts.graph.display()))?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &output)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{output}"),
    }
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
