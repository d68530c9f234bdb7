//! Wishlist domain type.

use serde::{Deserialize, Serialize};

use gamelib_core::GameId;

use super::Game;

/// A user's wishlist: an ordered, duplicate-free sequence of games.
///
/// Each wishlist belongs to exactly one user; repositories key wishlists by
/// username rather than embedding the owner here. Equality compares the game
/// sequence (by game identity, in order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    games: Vec<Game>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { games: Vec::new() }
    }

    /// Build a wishlist from a sequence of games, dropping duplicates while
    /// keeping the first occurrence's position.
    #[must_use]
    pub fn from_games(games: impl IntoIterator<Item = Game>) -> Self {
        let mut wishlist = Self::new();
        for game in games {
            wishlist.add_game(game);
        }
        wishlist
    }

    /// The games in wishlist order.
    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Append a game.
    ///
    /// Returns `false` (and leaves the list unchanged) if a game with the
    /// same id is already present.
    pub fn add_game(&mut self, game: Game) -> bool {
        if self.contains(game.id) {
            return false;
        }

        self.games.push(game);
        true
    }

    /// Remove the game with the given id, keeping the order of the rest.
    ///
    /// Returns `false` if no such game was present.
    pub fn remove_game(&mut self, id: GameId) -> bool {
        let before = self.games.len();
        self.games.retain(|game| game.id != id);
        self.games.len() != before
    }

    /// Whether a game with the given id is present.
    #[must_use]
    pub fn contains(&self, id: GameId) -> bool {
        self.games.iter().any(|game| game.id == id)
    }

    /// Number of games in the wishlist.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the wishlist holds no games.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64) -> Game {
        Game::new(GameId::new(id), format!("Game {id}"))
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add_game(game(1)));
        assert!(!wishlist.add_game(game(1)));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn remove_keeps_order_of_remaining_games() {
        let mut wishlist = Wishlist::from_games([game(1), game(2), game(3)]);
        assert!(wishlist.remove_game(GameId::new(2)));
        let ids: Vec<_> = wishlist.games().iter().map(|g| g.id.as_i64()).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn remove_of_absent_game_is_a_no_op() {
        let mut wishlist = Wishlist::from_games([game(1)]);
        assert!(!wishlist.remove_game(GameId::new(9)));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn from_games_drops_duplicates() {
        let wishlist = Wishlist::from_games([game(1), game(2), game(1)]);
        assert_eq!(wishlist.len(), 2);
    }
}
