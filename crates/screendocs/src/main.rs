//! screendocs CLI - screen API documentation sync.
//!
//! Provides commands for:
//! - `sync`: Push every screen's documentation page to Notion
//! - `render`: Print one screen's rendered document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SyncArgs};
use output::Output;

/// screendocs - Screen API documentation sync.
#[derive(Parser)]
#[command(name = "screendocs", version, about)]
struct Cli {
    /// Enable info-level logging (overrides `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync every screen's documentation into the Notion database.
    Sync(SyncArgs),
    /// Print the rendered document of one screen.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sync(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` forces INFO, otherwise `RUST_LOG` applies with WARN as fallback.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
