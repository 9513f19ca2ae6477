//! Folio CLI - static documentation page assembler.
//!
//! Provides commands for:
//! - `build`: Render every page of the docs directory to HTML files
//! - `check`: Validate and lint pages without writing anything
//! - `render`: Print one page's document to stdout

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, RenderArgs};
use output::Output;

/// Folio - static documentation page assembler.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (info-level logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site into the output directory.
    Build(BuildArgs),
    /// Validate and lint pages without writing output.
    Check(CheckArgs),
    /// Render one page to stdout.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(&output),
        Commands::Check(args) => args.execute(&output),
        Commands::Render(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
