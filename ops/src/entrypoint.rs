//! Container boot sequence
//!
//! In order, failing the process on the first unhandled error:
//! migrations, static collection, conditional ingredient seeding,
//! conditional superuser creation, then the application server. The seeding
//! and superuser steps have their own skip semantics (see `seed` and
//! `admin`); everything else propagates.

use crate::config::AppConfig;
use crate::error::OpsResult;
use crate::{admin, db, seed, server, staticfiles};
use std::process::ExitStatus;
use tracing::info;

/// Run the full entrypoint sequence and return the application server's
/// exit status
pub async fn run(config: &AppConfig) -> OpsResult<ExitStatus> {
    info!("Starting FoodGram entrypoint sequence");

    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;

    db::run_migrations(&pool).await?;
    staticfiles::collect_static(&config.staticfiles.sources, &config.staticfiles.root)?;
    seed::seed_ingredients(&pool, &config.seed.data_dir).await?;
    admin::ensure_admin(&pool, &config.admin).await?;

    // Release our connections before handing the database to the app server
    pool.close().await;

    server::run_app_server(
        &config.server.command,
        &config.server.host,
        config.server.port,
    )
    .await
}
