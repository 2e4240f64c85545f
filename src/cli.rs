//! Command-line arguments for the `fdlayout` binary

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Force-directed layout for small graphs in the unit square.
#[derive(Parser, Debug)]
#[command(name = "fdlayout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a layout and write the positioned nodes
    Layout(LayoutArgs),
    /// Check a graph document without laying it out
    Validate {
        /// Input graph document (.json, .yaml, .yml)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Input graph document (.json, .yaml, .yml)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file; the format follows its extension. Writes to stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format when writing to stdout
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Number of relaxation passes
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Node count used for the ideal spacing instead of the actual count
    #[arg(long, conflicts_with = "legacy")]
    pub expected_nodes: Option<usize>,

    /// Use the fixed 28-node spacing calibration
    #[arg(long)]
    pub legacy: bool,

    /// Emit `{nodes, edges}` instead of just the node array
    #[arg(long)]
    pub document: bool,
}
