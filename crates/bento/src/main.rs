//! Bento CLI - mime bundle rendering.
//!
//! Provides commands for:
//! - `render`: Render a bundle JSON file to an artifact
//! - `mimetypes`: List registered MIME types in precedence order

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MimetypesArgs, RenderArgs};
use output::Output;

/// Bento - mime bundle rendering.
#[derive(Parser)]
#[command(name = "bento", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a bundle file to an artifact.
    Render(RenderArgs),
    /// List registered MIME types in precedence order.
    Mimetypes(MimetypesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Mimetypes(args) => args.verbose,
    };

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Mimetypes(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
