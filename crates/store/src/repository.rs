//! Repository contract shared by every persistence backend.

use async_trait::async_trait;
use thiserror::Error;

use gamelib_core::{GameId, Username};

use crate::models::{Game, Genre, NewReview, Publisher, Review, User, Wishlist};

/// Errors that can occur during repository operations.
///
/// "Not found" is deliberately absent: lookups by key return `Ok(None)` so
/// that callers can distinguish a missing entity from a backend failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the backing store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., a review referencing an unknown user).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// The capability set any persistence backend must implement.
///
/// # Contract
///
/// - Every `add_*` is an **upsert by identity**: re-adding an entity with an
///   identity that already exists updates it in place; `all_*` counts never
///   change on a duplicate add.
/// - Query operations are total: they return empty collections rather than
///   failing, and key lookups return `Ok(None)` for missing entities.
/// - Failures propagate as typed [`RepositoryError`]s on every write path;
///   nothing is logged and swallowed.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Add or update a game (identity: id), including its genre links and
    /// publisher.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn add_game(&self, game: Game) -> Result<(), RepositoryError>;

    /// All games, ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn all_games(&self) -> Result<Vec<Game>, RepositoryError>;

    /// Look up a game by id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn game_by_id(&self, id: GameId) -> Result<Option<Game>, RepositoryError>;

    /// Games whose genre set intersects **any** of `genres` (OR semantics),
    /// ordered by id ascending.
    ///
    /// An empty filter - or one containing only blank genre names - returns
    /// all games.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn games_by_genres(&self, genres: &[Genre]) -> Result<Vec<Game>, RepositoryError>;

    /// Add a genre (identity: name).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn add_genre(&self, genre: Genre) -> Result<(), RepositoryError>;

    /// All genres.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn all_genres(&self) -> Result<Vec<Genre>, RepositoryError>;

    /// Add a publisher (identity: name).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn add_publisher(&self, publisher: Publisher) -> Result<(), RepositoryError>;

    /// All publishers.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn all_publishers(&self) -> Result<Vec<Publisher>, RepositoryError>;

    /// Store a review, assigning its id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the author or game does not
    /// exist, [`RepositoryError::Database`] on other backend failures.
    async fn add_review(&self, review: NewReview) -> Result<Review, RepositoryError>;

    /// All reviews, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn all_reviews(&self) -> Result<Vec<Review>, RepositoryError>;

    /// Add or update a user (identity: username).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn add_user(&self, user: User) -> Result<(), RepositoryError>;

    /// Look up a user by name.
    ///
    /// The query is normalized the same way usernames are at construction,
    /// so the lookup is case-insensitive; names that cannot be normalized
    /// (empty, interior whitespace) resolve to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn user_by_name(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// All users.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn all_users(&self) -> Result<Vec<User>, RepositoryError>;

    /// A user's wishlist, or `None` if they have never had one.
    ///
    /// Callers are responsible for lazily creating a wishlist via
    /// [`Repository::add_wishlist`].
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn wishlist(&self, user: &Username) -> Result<Option<Wishlist>, RepositoryError>;

    /// Add or replace a user's wishlist (upsert).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the user does not exist, or
    /// (SQLite backend) if a listed game does not exist;
    /// [`RepositoryError::Database`] on other backend failures.
    async fn add_wishlist(&self, user: &Username, wishlist: Wishlist)
    -> Result<(), RepositoryError>;

    /// Replace the game list of an existing wishlist; no-op if the user has
    /// no wishlist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn update_wishlist(
        &self,
        user: &Username,
        wishlist: Wishlist,
    ) -> Result<(), RepositoryError>;

    /// Remove a game from a user's wishlist; no-op if the game is absent or
    /// the user has no wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the backend fails.
    async fn remove_game_from_wishlist(
        &self,
        user: &Username,
        game: GameId,
    ) -> Result<(), RepositoryError>;
}
