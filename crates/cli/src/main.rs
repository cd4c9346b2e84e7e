//! Veranda storefront CLI.
//!
//! Drives the cart store, catalog, and content client against the
//! configured upstream backends. This binary is the storefront's "UI
//! consumer": it owns no cart state of its own and only reads the
//! store's published snapshots.

use std::process;

use clap::{Parser, Subcommand};
use veranda_app::config::AppConfig;

mod commands;
mod logging;

#[derive(Debug, Parser)]
#[command(name = "veranda", about = "Storefront client CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect and mutate the cart.
    Cart(commands::cart::CartCommand),
    /// Browse products and collections.
    Catalog(commands::catalog::CatalogCommand),
    /// Read articles and pages.
    Content(commands::content::ContentCommand),
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    if let Err(error) = logging::init() {
        eprintln!("failed to initialise logging: {error}");
    }

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Cart(command) => commands::cart::run(&cli.config, command).await,
        Commands::Catalog(command) => commands::catalog::run(&cli.config, command).await,
        Commands::Content(command) => commands::content::run(&cli.config, command).await,
    }
}
