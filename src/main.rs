use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fdlayout::io::{self, FormatRegistry, OutputShape};
use fdlayout::{LayoutConfig, LayoutEngine};

mod cli;

use cli::{Cli, Commands, LayoutArgs};

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_graph(registry: &FormatRegistry, input: &Path) -> anyhow::Result<fdlayout::Graph> {
    let reader = registry.reader_for_path(input)?;
    let graph = reader
        .read(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    Ok(graph)
}

fn config_from_args(args: &LayoutArgs) -> LayoutConfig {
    let mut config = if args.legacy {
        LayoutConfig::legacy()
    } else {
        LayoutConfig::default()
    };
    if let Some(iterations) = args.iterations {
        config = config.with_iterations(iterations);
    }
    if args.expected_nodes.is_some() {
        config = config.with_expected_node_count(args.expected_nodes);
    }
    config
}

fn run_layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let registry = FormatRegistry::with_defaults();
    let engine = LayoutEngine::new(config_from_args(args));
    let laid_out = io::layout_file(&registry, &engine, &args.input)
        .with_context(|| format!("failed to lay out {}", args.input.display()))?;

    info!(
        nodes = laid_out.nodes.len(),
        edges = laid_out.edges.len(),
        iterations = engine.config().iterations,
        "layout computed"
    );

    let shape = if args.document {
        OutputShape::Document
    } else {
        OutputShape::Nodes
    };

    match &args.output {
        Some(output) => {
            let writer = registry.writer_for_path(output)?;
            writer.write(&laid_out, shape, output)?;
            println!(
                "Wrote layout for {} nodes to {}",
                laid_out.nodes.len(),
                output.display()
            );
        }
        None => {
            let writer = registry
                .writer_for_format(&args.format)
                .ok_or_else(|| anyhow::anyhow!("unsupported output format: {}", args.format))?;
            println!("{}", writer.render(&laid_out, shape)?);
        }
    }

    Ok(())
}

fn run_validate(input: &Path) -> anyhow::Result<()> {
    let registry = FormatRegistry::with_defaults();
    let graph = read_graph(&registry, input)?;
    graph
        .validate()
        .with_context(|| format!("invalid graph in {}", input.display()))?;
    println!(
        "{} is valid: {} nodes, {} edges",
        input.display(),
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout(args) => run_layout(&args),
        Commands::Validate { input } => run_validate(&input),
    }
}
