//! Command implementations.

use std::path::Path;

use sqlx::SqlitePool;
use thiserror::Error;

use gamelib_core::{Username, UsernameError};
use gamelib_store::auth::{self, AuthError};
use gamelib_store::loader::{self, LoaderError};
use gamelib_store::models::User;
use gamelib_store::repository::Repository;
use gamelib_store::{DatabaseRepository, RepositoryError, db};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("bulk load error: {0}")]
    Loader(#[from] LoaderError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

async fn connect() -> Result<SqlitePool, CliError> {
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| CliError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}

/// Run all pending migrations.
pub async fn migrate() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("running migrations...");
    db::migrate(&pool).await?;

    tracing::info!("migrations complete");
    Ok(())
}

/// Migrate, then bulk-load the CSV catalog from `data`.
pub async fn populate(data: &Path) -> Result<(), CliError> {
    let pool = connect().await?;

    db::migrate(&pool).await?;

    let repo = DatabaseRepository::new(pool);
    loader::populate(data, &repo).await?;

    tracing::info!("bulk load complete");
    Ok(())
}

/// Hash the password and upsert the user.
pub async fn register(username: &str, password: &str) -> Result<(), CliError> {
    let username = Username::parse(username)?;
    auth::validate_password(password)?;
    let password_hash = auth::hash_password(password)?;

    let pool = connect().await?;
    db::migrate(&pool).await?;

    let repo = DatabaseRepository::new(pool);
    repo.add_user(User::new(username.clone(), password_hash))
        .await?;

    tracing::info!(%username, "user registered");
    Ok(())
}
