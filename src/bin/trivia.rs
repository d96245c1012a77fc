use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::settings;
use trivia_api::telemetry::init_tracing;
use trivia_api::transfer::{export_data, import_data};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and serve the HTTP API
    Serve,
    /// Apply database migrations
    Migrate,
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv to a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let settings = settings::load().context("Failed to load settings")?;
    let pool = establish_connection(&settings.database)
        .await
        .with_context(|| format!("Cannot connect to DB at {}", settings.database.path))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Running db migrations...");
            run_migrations(&pool).await?;
            run_server(pool, &settings.application.address()).await?
        }
        Commands::Migrate => run_migrations(&pool).await?,
        Commands::Import { path } => import_data(&pool, &path).await?,
        Commands::Export { path } => export_data(&pool, &path).await?,
    };
    Ok(())
}
