//! Souk CLI - category detection and listing search over a catalog snapshot.
//!
//! Commands:
//! - `souk detect` - Detect the category of a free-text query
//! - `souk resolve` - Show the facet schema of a category
//! - `souk search` - Run a filtered search
//! - `souk config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use souk_observability::{init_logging, LogLevel};

use commands::{ConfigArgs, DetectArgs, ResolveArgs, SearchArgs};

/// Souk CLI - Detect categories and search classified listings
#[derive(Parser)]
#[command(name = "souk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the category of a search query
    Detect(DetectArgs),

    /// Show how a category resolves to a facet schema
    Resolve(ResolveArgs),

    /// Search listings with facets
    Search(SearchArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut log_config = ctx.config.logging.clone();
    if cli.verbose {
        log_config.level = log_config.level.min(LogLevel::Debug);
    }
    if let Err(e) = init_logging(&log_config) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    let result = match cli.command {
        Commands::Detect(args) => commands::detect::run(args, &ctx).await,
        Commands::Resolve(args) => commands::resolve::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
