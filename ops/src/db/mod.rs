//! Database connection and pool management
//!
//! Pool construction with production-oriented settings, embedded
//! migrations, and the clean-slate reset used by `bootstrap --clean`.

use crate::error::OpsResult;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Create a PostgreSQL connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> OpsResult<PgPool> {
    let connect_options =
        PgConnectOptions::from_str(database_url)?.application_name("foodgram-ops");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(max_connections, "Database pool created");
    Ok(pool)
}

/// Apply embedded migrations
pub async fn run_migrations(pool: &PgPool) -> OpsResult<()> {
    info!("Applying database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Drop and recreate the public schema
///
/// The clean-slate path of `bootstrap --clean`: every table, including the
/// migrations ledger, is removed so the next `run_migrations` starts fresh.
pub async fn reset_schema(pool: &PgPool) -> OpsResult<()> {
    warn!("Resetting database schema (all data will be lost)");
    sqlx::query("DROP SCHEMA public CASCADE")
        .execute(pool)
        .await?;
    sqlx::query("CREATE SCHEMA public").execute(pool).await?;
    info!("Schema reset complete");
    Ok(())
}

/// Check database connectivity
pub async fn health_check(pool: &PgPool) -> OpsResult<()> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ()).map_err(|e| {
        warn!("Database health check failed: {}", e);
        e.into()
    })
}
