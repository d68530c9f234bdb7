//! SQLite-backed persistence.
//!
//! ## Tables
//!
//! - `games`, `genres`, `publishers`, `users`, `reviews`, `wishlists`
//! - Junctions: `game_genres`, `user_reviews`, `game_reviews`,
//!   `wishlist_games` (with a `position` column preserving wishlist order)
//!
//! Uniqueness is enforced on game id, genre name, publisher name, and
//! username; reviews auto-assign a surrogate id.
//!
//! # Migrations
//!
//! Migrations live in `crates/store/migrations/` and are embedded via
//! [`sqlx::migrate!`]; run them with [`migrate`] or through the CLI:
//!
//! ```bash
//! cargo run -p gamelib-cli -- migrate
//! ```

mod repository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use repository::DatabaseRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a SQLite connection pool with sensible defaults.
///
/// The database file is created if missing and foreign keys are enforced on
/// every connection.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string is invalid or the
/// connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database (tests, demos).
///
/// Limited to a single connection: an in-memory SQLite database is scoped to
/// its connection, so a second one would see an empty schema.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns [`MigrateError`] if a migration fails or was altered after being
/// applied.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
