//! Persistence layer for the ALRCF backend.
//!
//! Exposes the connection pool helpers plus the [`models`] and
//! [`repositories`] modules. All queries are parameterized; repositories are
//! zero-sized structs whose async methods take `&PgPool` as the first
//! argument.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

/// Shared PostgreSQL connection pool type.
pub type DbPool = sqlx::PgPool;

/// Default maximum number of pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial round-trip query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from the embedded `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
