//! ECML CLI - tag processor.
//!
//! Provides commands for:
//! - `tokens`: Print the token sequence of a document as JSON
//! - `render`: Replace tags using templates from `ecml.toml`

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, TokensArgs};
use output::Output;

/// ECML - bracketed tag processor.
#[derive(Parser)]
#[command(name = "ecml", version, about)]
struct Cli {
    /// Enable verbose logging (INFO level).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token sequence of a document.
    Tokens(TokensArgs),
    /// Render a document through tag templates.
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
        Commands::Tokens(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
