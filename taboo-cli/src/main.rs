//! Taboo CLI - Command-line interface
//!
//! Commands:
//! - generate: Build an instance file for one language and retrieval mode
//! - translate: Port an existing instance file to another language

mod generate;
mod translate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taboo")]
#[command(about = "Taboo game instance generator")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate game instances
    Generate(generate::GenerateArgs),
    /// Translate an instance file into another language
    Translate(translate::TranslateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Translate(args) => translate::run(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
