use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;

/// Opens the PostgreSQL pool shared by the job catalog and user lookups.
///
/// The `jobs` and `users` tables are expected to exist already.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established (max {MAX_CONNECTIONS} connections)");
    Ok(pool)
}
