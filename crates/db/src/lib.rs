//! Metadata store for the image-processing job queue.
//!
//! SQLite behind a deliberately bounded pool: the store's callers are
//! concurrent (one per partition worker), but physical writes go
//! through a single connection so partial updates can never interleave.
//! Contention shows up as pool-acquire waiting, nothing else.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub mod error;
pub mod models;
pub mod repositories;

pub use error::StoreError;

/// Open the metadata store at `database_url` (e.g.
/// `sqlite://imgproc.db` or `sqlite::memory:`), creating the database
/// file if it does not exist.
///
/// The pool is pinned to exactly one connection — the single-writer
/// discipline the rest of the system relies on.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .connect_with(options)
        .await
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Cheap connectivity probe, used at startup where a store failure is
/// fatal.
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
