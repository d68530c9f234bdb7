//! Game catalog domain types.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use gamelib_core::{GameId, Price};

/// A game genre.
///
/// Immutable value type; identity is the (case-sensitive) name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genre(String);

impl Genre {
    /// Create a genre, trimming surrounding whitespace.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_owned())
    }

    /// The genre name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A game publisher.
///
/// Immutable value type; identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Publisher(String);

impl Publisher {
    /// Create a publisher, trimming surrounding whitespace.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_owned())
    }

    /// The publisher name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Platform availability flags for a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platforms {
    /// Runs on Windows.
    pub windows: bool,
    /// Runs on macOS.
    pub mac: bool,
    /// Runs on Linux.
    pub linux: bool,
}

/// A game in the catalog.
///
/// Identity is the integer id: equality, hashing, and ordering all ignore the
/// other attributes, so a re-added game with the same id replaces the old one
/// in any identity-keyed collection.
///
/// Genres form an ordered set: insertion order is preserved for display while
/// [`Game::add_genre`] rejects duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique catalog id.
    pub id: GameId,
    /// Display title.
    pub title: String,
    /// Non-negative price.
    pub price: Price,
    /// Release date as free text, preserved verbatim from the source data.
    pub release_date: String,
    /// Long description, if any.
    pub description: Option<String>,
    /// Header image URL, if any.
    pub image_url: Option<String>,
    /// Website URL, if any.
    pub website_url: Option<String>,
    /// Platform availability.
    pub platforms: Platforms,
    /// Publisher, if known.
    pub publisher: Option<Publisher>,
    genres: Vec<Genre>,
}

impl Game {
    /// Create a game with the given identity and title; everything else
    /// starts empty (price zero, no genres, no publisher).
    #[must_use]
    pub fn new(id: GameId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price: Price::FREE,
            release_date: String::new(),
            description: None,
            image_url: None,
            website_url: None,
            platforms: Platforms::default(),
            publisher: None,
            genres: Vec::new(),
        }
    }

    /// The game's genres in insertion order.
    #[must_use]
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Append a genre, keeping the list duplicate-free.
    ///
    /// Returns `false` (and leaves the list unchanged) if the genre was
    /// already present.
    pub fn add_genre(&mut self, genre: Genre) -> bool {
        if self.genres.contains(&genre) {
            return false;
        }

        self.genres.push(genre);
        true
    }

    /// Whether the game carries the given genre.
    #[must_use]
    pub fn has_genre(&self, genre: &Genre) -> bool {
        self.genres.contains(genre)
    }

    /// Whether the game's genre set intersects any of `filters`.
    ///
    /// Blank filter entries never match; an empty slice never matches
    /// (the "empty filter means all games" rule lives in the repositories,
    /// which skip filtering entirely in that case).
    #[must_use]
    pub fn matches_any_genre(&self, filters: &[Genre]) -> bool {
        filters
            .iter()
            .any(|genre| !genre.name().is_empty() && self.has_genre(genre))
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Game {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Game {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
