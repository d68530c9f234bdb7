//! SQLite repository implementation.
//!
//! Every public operation is one transaction: multi-statement writes (a game
//! plus its genre links, a review plus its junction rows, a wishlist
//! replacement) either land completely or not at all. Read-modify-write
//! sequences run inside the same transaction, so there is no lost-update
//! window between operations of this repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use gamelib_core::{GameId, Price, Rating, ReviewId, Username};

use crate::models::{Game, Genre, NewReview, Platforms, Publisher, Review, User, Wishlist};
use crate::repository::{Repository, RepositoryError};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for game queries (genre links are fetched separately).
#[derive(Debug, sqlx::FromRow)]
struct GameRow {
    game_id: i64,
    title: String,
    price: f64,
    release_date: String,
    description: Option<String>,
    image_url: Option<String>,
    website_url: Option<String>,
    windows: bool,
    mac: bool,
    linux: bool,
    publisher_name: Option<String>,
}

impl GameRow {
    fn into_game(self, genres: Vec<Genre>) -> Result<Game, RepositoryError> {
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid price for game {}: {e}",
                self.game_id
            ))
        })?;

        let mut game = Game::new(GameId::new(self.game_id), self.title);
        game.price = price;
        game.release_date = self.release_date;
        game.description = self.description;
        game.image_url = self.image_url;
        game.website_url = self.website_url;
        game.platforms = Platforms {
            windows: self.windows,
            mac: self.mac,
            linux: self.linux,
        };
        game.publisher = self.publisher_name.map(Publisher::new);
        for genre in genres {
            game.add_genre(genre);
        }

        Ok(game)
    }
}

// Qualified so the list also works in joins against wishlist_games.
const GAME_COLUMNS: &str = "games.game_id, games.title, games.price, games.release_date, \
                            games.description, games.image_url, games.website_url, \
                            games.windows, games.mac, games.linux, games.publisher_name";

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self::new(username, row.password_hash))
    }
}

/// Internal row type for review queries.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    review_id: i64,
    game_id: i64,
    username: String,
    rating: i64,
    comment: Option<String>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let author = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let rating = u8::try_from(row.rating)
            .ok()
            .and_then(|value| Rating::new(value).ok())
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "invalid rating {} for review {}",
                    row.rating, row.review_id
                ))
            })?;

        Ok(Self {
            id: ReviewId::new(row.review_id),
            author,
            game: GameId::new(row.game_id),
            rating,
            comment: row.comment.unwrap_or_default(),
        })
    }
}

// =============================================================================
// Error mapping
// =============================================================================

fn foreign_key_conflict(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository backed by a SQLite database.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseRepository {
    pool: SqlitePool,
}

impl DatabaseRepository {
    /// Create a repository over an already-migrated pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Attach genre links to game rows, preserving the rows' order.
    fn assemble_games(
        rows: Vec<GameRow>,
        links: Vec<(i64, String)>,
    ) -> Result<Vec<Game>, RepositoryError> {
        let mut genres_by_game: HashMap<i64, Vec<Genre>> = HashMap::new();
        for (game_id, name) in links {
            genres_by_game
                .entry(game_id)
                .or_default()
                .push(Genre::new(name));
        }

        rows.into_iter()
            .map(|row| {
                let genres = genres_by_game.remove(&row.game_id).unwrap_or_default();
                row.into_game(genres)
            })
            .collect()
    }

    /// Replace the `wishlist_games` rows for a wishlist inside `tx`.
    async fn replace_wishlist_games(
        tx: &mut Transaction<'_, Sqlite>,
        wishlist_id: i64,
        wishlist: &Wishlist,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM wishlist_games WHERE wishlist_id = ?1")
            .bind(wishlist_id)
            .execute(&mut **tx)
            .await?;

        for (position, game) in (0_i64..).zip(wishlist.games()) {
            sqlx::query(
                "INSERT INTO wishlist_games (wishlist_id, game_id, position) \
                 VALUES (?1, ?2, ?3)",
            )
            .bind(wishlist_id)
            .bind(game.id)
            .bind(position)
            .execute(&mut **tx)
            .await
            .map_err(|e| foreign_key_conflict(e, "wishlist references an unknown game"))?;
        }

        Ok(())
    }
}

#[async_trait]
impl Repository for DatabaseRepository {
    async fn add_game(&self, game: Game) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if let Some(publisher) = &game.publisher {
            sqlx::query("INSERT INTO publishers (name) VALUES (?1) ON CONFLICT (name) DO NOTHING")
                .bind(publisher.name())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "INSERT INTO games (game_id, title, price, release_date, description, image_url, \
                                website_url, windows, mac, linux, publisher_name) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
             ON CONFLICT (game_id) DO UPDATE SET \
                 title = excluded.title, \
                 price = excluded.price, \
                 release_date = excluded.release_date, \
                 description = excluded.description, \
                 image_url = excluded.image_url, \
                 website_url = excluded.website_url, \
                 windows = excluded.windows, \
                 mac = excluded.mac, \
                 linux = excluded.linux, \
                 publisher_name = excluded.publisher_name",
        )
        .bind(game.id)
        .bind(&game.title)
        .bind(game.price.amount())
        .bind(&game.release_date)
        .bind(&game.description)
        .bind(&game.image_url)
        .bind(&game.website_url)
        .bind(game.platforms.windows)
        .bind(game.platforms.mac)
        .bind(game.platforms.linux)
        .bind(game.publisher.as_ref().map(Publisher::name))
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM game_genres WHERE game_id = ?1")
            .bind(game.id)
            .execute(&mut *tx)
            .await?;

        for genre in game.genres() {
            sqlx::query(
                "INSERT INTO genres (genre_name) VALUES (?1) ON CONFLICT (genre_name) DO NOTHING",
            )
            .bind(genre.name())
            .execute(&mut *tx)
            .await?;

            sqlx::query("INSERT INTO game_genres (game_id, genre_name) VALUES (?1, ?2)")
                .bind(game.id)
                .bind(genre.name())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn all_games(&self) -> Result<Vec<Game>, RepositoryError> {
        let rows: Vec<GameRow> =
            sqlx::query_as(&format!("SELECT {GAME_COLUMNS} FROM games ORDER BY game_id"))
                .fetch_all(&self.pool)
                .await?;

        let links: Vec<(i64, String)> =
            sqlx::query_as("SELECT game_id, genre_name FROM game_genres ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Self::assemble_games(rows, links)
    }

    async fn game_by_id(&self, id: GameId) -> Result<Option<Game>, RepositoryError> {
        let row: Option<GameRow> =
            sqlx::query_as(&format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let links: Vec<(i64, String)> = sqlx::query_as(
            "SELECT game_id, genre_name FROM game_genres WHERE game_id = ?1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Self::assemble_games(vec![row], links).map(|mut games| games.pop())
    }

    async fn games_by_genres(&self, genres: &[Genre]) -> Result<Vec<Game>, RepositoryError> {
        // Same semantics as the in-memory backend: fetch the catalog and
        // intersect genre sets in process. The catalog is small enough that
        // this beats building a dynamic IN clause.
        let games = self.all_games().await?;
        if genres.iter().all(|genre| genre.name().is_empty()) {
            return Ok(games);
        }

        Ok(games
            .into_iter()
            .filter(|game| game.matches_any_genre(genres))
            .collect())
    }

    async fn add_genre(&self, genre: Genre) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO genres (genre_name) VALUES (?1) ON CONFLICT (genre_name) DO NOTHING",
        )
        .bind(genre.name())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn all_genres(&self) -> Result<Vec<Genre>, RepositoryError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT genre_name FROM genres ORDER BY genre_name")
                .fetch_all(&self.pool)
                .await?;

        Ok(names.into_iter().map(Genre::new).collect())
    }

    async fn add_publisher(&self, publisher: Publisher) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO publishers (name) VALUES (?1) ON CONFLICT (name) DO NOTHING")
            .bind(publisher.name())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn all_publishers(&self) -> Result<Vec<Publisher>, RepositoryError> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM publishers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(names.into_iter().map(Publisher::new).collect())
    }

    async fn add_review(&self, review: NewReview) -> Result<Review, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let review_id: i64 = sqlx::query_scalar(
            "INSERT INTO reviews (game_id, username, rating, comment) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING review_id",
        )
        .bind(review.game)
        .bind(review.author.as_str())
        .bind(i64::from(review.rating.as_u8()))
        .bind(&review.comment)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| foreign_key_conflict(e, "review references an unknown user or game"))?;

        sqlx::query("INSERT INTO user_reviews (username, review_id) VALUES (?1, ?2)")
            .bind(review.author.as_str())
            .bind(review_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO game_reviews (game_id, review_id) VALUES (?1, ?2)")
            .bind(review.game)
            .bind(review_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(review.with_id(ReviewId::new(review_id)))
    }

    async fn all_reviews(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            "SELECT review_id, game_id, username, rating, comment \
             FROM reviews ORDER BY review_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn add_user(&self, user: User) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2) \
             ON CONFLICT (username) DO UPDATE SET password_hash = excluded.password_hash",
        )
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn user_by_name(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(None);
        };

        let row: Option<UserRow> =
            sqlx::query_as("SELECT username, password_hash FROM users WHERE username = ?1")
                .bind(username.as_str())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn all_users(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT username, password_hash FROM users ORDER BY username")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn wishlist(&self, user: &Username) -> Result<Option<Wishlist>, RepositoryError> {
        let wishlist_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM wishlists WHERE username = ?1")
                .bind(user.as_str())
                .fetch_optional(&self.pool)
                .await?;

        let Some(wishlist_id) = wishlist_id else {
            return Ok(None);
        };

        let rows: Vec<GameRow> = sqlx::query_as(&format!(
            "SELECT {GAME_COLUMNS} FROM games \
             JOIN wishlist_games ON wishlist_games.game_id = games.game_id \
             WHERE wishlist_games.wishlist_id = ?1 \
             ORDER BY wishlist_games.position"
        ))
        .bind(wishlist_id)
        .fetch_all(&self.pool)
        .await?;

        let links: Vec<(i64, String)> = sqlx::query_as(
            "SELECT game_genres.game_id, game_genres.genre_name FROM game_genres \
             JOIN wishlist_games ON wishlist_games.game_id = game_genres.game_id \
             WHERE wishlist_games.wishlist_id = ?1 \
             ORDER BY game_genres.id",
        )
        .bind(wishlist_id)
        .fetch_all(&self.pool)
        .await?;

        let games = Self::assemble_games(rows, links)?;
        Ok(Some(Wishlist::from_games(games)))
    }

    async fn add_wishlist(
        &self,
        user: &Username,
        wishlist: Wishlist,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO wishlists (username) VALUES (?1) ON CONFLICT (username) DO NOTHING")
            .bind(user.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| foreign_key_conflict(e, "wishlist references an unknown user"))?;

        let wishlist_id: i64 = sqlx::query_scalar("SELECT id FROM wishlists WHERE username = ?1")
            .bind(user.as_str())
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_wishlist_games(&mut tx, wishlist_id, &wishlist).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_wishlist(
        &self,
        user: &Username,
        wishlist: Wishlist,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let wishlist_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM wishlists WHERE username = ?1")
                .bind(user.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        // No-op when the user has no wishlist yet.
        let Some(wishlist_id) = wishlist_id else {
            return Ok(());
        };

        Self::replace_wishlist_games(&mut tx, wishlist_id, &wishlist).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn remove_game_from_wishlist(
        &self,
        user: &Username,
        game: GameId,
    ) -> Result<(), RepositoryError> {
        // Single statement, so the check-then-delete cannot race: absent
        // wishlists and absent games both fall through to zero rows affected.
        sqlx::query(
            "DELETE FROM wishlist_games \
             WHERE game_id = ?1 \
               AND wishlist_id = (SELECT id FROM wishlists WHERE username = ?2)",
        )
        .bind(game)
        .bind(user.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
