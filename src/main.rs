//! # Booking Directory Main Entry Point
//!
//! `booking serve` (the default) migrates the database and starts the HTTP
//! API; `booking migrate` and `booking seed` run the maintenance steps alone.

use anyhow::{Context, Result, anyhow};
use booking::{
    config::ConfigLoader,
    db::{init_pool, run_migrations},
    seeds::seed_directory,
    server::run_server,
    telemetry::init_tracing,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "booking")]
#[command(author, version, about = "Venue, artist and show booking directory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Apply migrations, then serve the HTTP API
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Insert the demo directory into an empty store
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;
    init_tracing(&config)?;

    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Loaded configuration");
    }
    tracing::info!(profile = %config.profile, "Starting booking directory");

    let db = init_pool(&config).await?;
    run_migrations(&db).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => Ok(()),
        Command::Seed => {
            let summary = seed_directory(&db).await?;
            if summary.is_empty() {
                tracing::info!("Store already populated; nothing seeded");
            }
            Ok(())
        }
        Command::Serve => {
            if config.seed_demo_data {
                seed_directory(&db).await?;
            }
            run_server(config, db)
                .await
                .map_err(|err| anyhow!("server error: {err}"))
        }
    }
}
