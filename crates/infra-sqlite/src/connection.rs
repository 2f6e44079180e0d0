// SQLite Connection Pool Setup

use cinevault_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Create the SQLite connection pool with WAL mode and foreign-key
/// enforcement. This pool is the process-lifetime gateway to the store;
/// a failure to open it is `StorageUnavailable`.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        // Set per connection via options so every pooled connection
        // enforces referential integrity, not just the first one.
        .foreign_keys(true)
        .create_if_missing(true);

    // An in-memory SQLite database exists per connection; cap the pool at
    // one so every caller sees the same database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

    Ok(pool)
}
