//! Database connection pool and migration management.
//!
//! This module provides utilities for:
//! - Creating the PostgreSQL connection pool shared by the store
//! - Applying the `users` / `transactions` schema at startup

use sqlx::{Pool, Postgres};

/// Type alias for PostgreSQL connection pool.
///
/// Only `PgStore` and the startup code see the pool; services go through the store traits.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Upper bound on pooled connections (`DATABASE_MAX_CONNECTIONS`)
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server
/// cannot be reached or rejects the credentials.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply pending migrations from `migrations/`.
///
/// Applied versions are recorded in `_sqlx_migrations`, so restarting the
/// service against an up-to-date database is a no-op.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // Embedded at compile time
    sqlx::migrate!("./migrations").run(pool).await
}
