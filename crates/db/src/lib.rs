//! Persistence layer for the nudge backend.
//!
//! Exposes the [`NudgeStore`] trait with two implementations: the
//! production [`PgNudgeStore`] backed by a shared `sqlx` Postgres pool,
//! and [`MemoryNudgeStore`], which keeps the collection in process
//! memory and backs local development and the API integration tests.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryNudgeStore;
pub use postgres::PgNudgeStore;
pub use store::{NudgeStore, StoreError};

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// One pool is created at startup and shared for the process lifetime;
/// handlers never open their own connections.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
