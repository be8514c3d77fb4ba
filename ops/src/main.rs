//! FoodGram Operations Binary
//!
//! The deployment surface of the recipe-sharing application as one CLI:
//! - `entrypoint`: the container boot sequence (migrate, collect static,
//!   seed ingredients, ensure superuser, launch the app server)
//! - `bootstrap`: local-development setup with an optional clean slate
//! - `seed-ingredients`: run the ingredient import directly against a file

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use foodgram_ops::{bootstrap, config, db, entrypoint, seed};
use foodgram_shared::SeedFormat;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "foodgram-ops", version, about = "FoodGram deployment operations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the container boot sequence and launch the application server
    Entrypoint,
    /// Prepare a local development environment and start the dev server
    Bootstrap {
        /// Drop and recreate the database schema first
        #[arg(long)]
        clean: bool,
    },
    /// Import ingredient reference data from a file
    SeedIngredients {
        /// Path to the file with ingredients data
        file_path: PathBuf,
        /// Format of the file with ingredients data
        #[arg(long, value_enum, default_value = "json")]
        file_format: FileFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FileFormat {
    Json,
    Csv,
}

impl From<FileFormat> for SeedFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Json => SeedFormat::Json,
            FileFormat::Csv => SeedFormat::Csv,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() {
            "production"
        } else {
            "development"
        },
        "Starting foodgram-ops"
    );

    match cli.command {
        Command::Entrypoint => {
            let status = entrypoint::run(&config).await?;
            std::process::exit(status.code().unwrap_or(1));
        }
        Command::Bootstrap { clean } => {
            let status = bootstrap::run(&config, clean).await?;
            std::process::exit(status.code().unwrap_or(1));
        }
        Command::SeedIngredients {
            file_path,
            file_format,
        } => {
            let pool =
                db::create_pool(&config.database.url, config.database.max_connections).await?;
            let report =
                seed::import_ingredients(&pool, &file_path, file_format.into()).await?;
            println!(
                "Imported {} ingredients ({} duplicates, {} skipped)",
                report.inserted, report.duplicates, report.skipped
            );
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "foodgram_ops=info,sqlx=warn".into()
        } else {
            "foodgram_ops=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
