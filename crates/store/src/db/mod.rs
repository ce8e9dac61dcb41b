//! Database pool, error type, and transaction scope.
//!
//! # Database
//!
//! A single `SQLite` database holds the whole commerce domain:
//!
//! ## Tables
//!
//! - `customer` - Customer identity rows
//! - `address` - One address per customer (replaced whole on update)
//! - `creditcard` - One credit card per customer (replaced whole on update)
//! - `product` - Catalog entries, unique by UPC
//! - `purchase` - Purchases linking customers to products
//!
//! # Migrations
//!
//! Migrations are stored in `crates/store/migrations/` and embedded at
//! compile time; run them with `MIGRATOR` against a fresh pool:
//!
//! ```rust,ignore
//! clementine_store::db::MIGRATOR.run(&pool).await?;
//! ```

mod tx;

pub use tx::transaction;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use crate::config::StoreConfig;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Caller-supplied input violates an operation's contract. Raised
    /// before any row is touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Constraint violation (e.g., duplicate UPC).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `SQLite` connection pool from the given configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened.
pub async fn create_pool(config: &StoreConfig) -> Result<SqlitePool, sqlx::Error> {
    // SQLite enforces foreign keys only when the pragma is enabled; the
    // schema's declared references are left unenforced by design (see
    // DESIGN.md) so a customer delete can orphan its dependents. sqlx
    // enables the pragma by default, so turn it back off explicitly.
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.foreign_keys(false);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options)
        .await
}
