//! Local-development bootstrap
//!
//! The convenience sequence for a developer machine: optionally reset the
//! schema (`--clean`), migrate, seed, and start the development server.
//! Exit status is that of the last step.

use crate::config::AppConfig;
use crate::error::OpsResult;
use crate::{db, seed, server};
use std::process::ExitStatus;
use tracing::info;

/// Run the bootstrap sequence and return the dev server's exit status
pub async fn run(config: &AppConfig, clean: bool) -> OpsResult<ExitStatus> {
    info!(clean, "Starting local development bootstrap");

    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;

    if clean {
        db::reset_schema(&pool).await?;
    }
    db::run_migrations(&pool).await?;
    seed::seed_ingredients(&pool, &config.seed.data_dir).await?;

    pool.close().await;

    server::run_app_server(
        &config.server.command,
        &config.server.host,
        config.server.port,
    )
    .await
}
