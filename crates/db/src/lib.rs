//! Persistence layer: connection pool, migrations, row models, and
//! repositories for `users` and `orders`.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod classify;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Pool settings shared by [`create_pool`] and lazily connected test pools.
///
/// `acquire_timeout` bounds how long a query waits for a connection, which
/// includes retrying a refused connect. It must stay below the HTTP request
/// timeout.
pub fn pool_options(max_connections: u32, acquire_timeout: Duration) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
}

/// Create a connection pool and open its first connection.
pub async fn create_pool(
    connect_options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    pool_options(max_connections, acquire_timeout)
        .connect_with(connect_options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
