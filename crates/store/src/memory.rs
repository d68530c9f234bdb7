//! Collection-backed repository for tests and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gamelib_core::{GameId, ReviewId, Username};

use crate::models::{Game, Genre, NewReview, Publisher, Review, User, Wishlist};
use crate::repository::{Repository, RepositoryError};

/// In-memory repository backed by plain collections.
///
/// All state sits behind a single reader-writer lock: reads proceed
/// concurrently, writes take the lock exclusively. Games are kept sorted by
/// id so that `all_games` and the genre filter return id-ascending order
/// without re-sorting.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    games: Vec<Game>,
    genres: Vec<Genre>,
    publishers: Vec<Publisher>,
    users: Vec<User>,
    reviews: Vec<Review>,
    wishlists: HashMap<Username, Wishlist>,
    next_review_id: i64,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn add_game(&self, game: Game) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        match inner.games.binary_search_by_key(&game.id, |g| g.id) {
            Ok(index) => {
                if let Some(slot) = inner.games.get_mut(index) {
                    *slot = game;
                }
            }
            Err(index) => inner.games.insert(index, game),
        }
        Ok(())
    }

    async fn all_games(&self) -> Result<Vec<Game>, RepositoryError> {
        Ok(self.inner.read().await.games.clone())
    }

    async fn game_by_id(&self, id: GameId) -> Result<Option<Game>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.games.iter().find(|game| game.id == id).cloned())
    }

    async fn games_by_genres(&self, genres: &[Genre]) -> Result<Vec<Game>, RepositoryError> {
        let inner = self.inner.read().await;
        if genres.iter().all(|genre| genre.name().is_empty()) {
            return Ok(inner.games.clone());
        }

        Ok(inner
            .games
            .iter()
            .filter(|game| game.matches_any_genre(genres))
            .cloned()
            .collect())
    }

    async fn add_genre(&self, genre: Genre) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        if !inner.genres.contains(&genre) {
            inner.genres.push(genre);
        }
        Ok(())
    }

    async fn all_genres(&self) -> Result<Vec<Genre>, RepositoryError> {
        Ok(self.inner.read().await.genres.clone())
    }

    async fn add_publisher(&self, publisher: Publisher) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        if !inner.publishers.contains(&publisher) {
            inner.publishers.push(publisher);
        }
        Ok(())
    }

    async fn all_publishers(&self) -> Result<Vec<Publisher>, RepositoryError> {
        Ok(self.inner.read().await.publishers.clone())
    }

    async fn add_review(&self, review: NewReview) -> Result<Review, RepositoryError> {
        let mut inner = self.inner.write().await;

        // Same referential-integrity contract as the SQLite backend.
        if !inner.users.iter().any(|user| user.username == review.author) {
            return Err(RepositoryError::Conflict(format!(
                "review references unknown user '{}'",
                review.author
            )));
        }
        if !inner.games.iter().any(|game| game.id == review.game) {
            return Err(RepositoryError::Conflict(format!(
                "review references unknown game {}",
                review.game
            )));
        }

        inner.next_review_id += 1;
        let review = review.with_id(ReviewId::new(inner.next_review_id));
        inner.reviews.push(review.clone());
        Ok(review)
    }

    async fn all_reviews(&self) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.inner.read().await.reviews.clone())
    }

    async fn add_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        match inner
            .users
            .iter_mut()
            .find(|existing| existing.username == user.username)
        {
            Some(existing) => *existing = user,
            None => inner.users.push(user),
        }
        Ok(())
    }

    async fn user_by_name(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(None);
        };

        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn all_users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn wishlist(&self, user: &Username) -> Result<Option<Wishlist>, RepositoryError> {
        Ok(self.inner.read().await.wishlists.get(user).cloned())
    }

    async fn add_wishlist(
        &self,
        user: &Username,
        wishlist: Wishlist,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;

        // Same referential-integrity contract as the SQLite backend.
        if !inner.users.iter().any(|u| &u.username == user) {
            return Err(RepositoryError::Conflict(format!(
                "wishlist references unknown user '{user}'"
            )));
        }

        inner.wishlists.insert(user.clone(), wishlist);
        Ok(())
    }

    async fn update_wishlist(
        &self,
        user: &Username,
        wishlist: Wishlist,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.wishlists.get_mut(user) {
            *existing = wishlist;
        }
        Ok(())
    }

    async fn remove_game_from_wishlist(
        &self,
        user: &Username,
        game: GameId,
    ) -> Result<(), RepositoryError> {
        // Single write-lock acquisition: the read-modify-write cannot
        // interleave with another writer.
        let mut inner = self.inner.write().await;
        if let Some(wishlist) = inner.wishlists.get_mut(user) {
            wishlist.remove_game(game);
        }
        Ok(())
    }
}
