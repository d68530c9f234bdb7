//! Review domain types.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use gamelib_core::{GameId, Rating, ReviewId, Username};

/// A review submitted by a caller, before the store has assigned an id.
///
/// The author and target game must exist in the repository when the review is
/// added; backends reject orphan reviews with a conflict error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    /// Username of the review author.
    pub author: Username,
    /// Id of the reviewed game.
    pub game: GameId,
    /// Star rating.
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
}

impl NewReview {
    /// Attach a store-assigned id, producing the immutable [`Review`].
    #[must_use]
    pub fn with_id(self, id: ReviewId) -> Review {
        Review {
            id,
            author: self.author,
            game: self.game,
            rating: self.rating,
            comment: self.comment,
        }
    }
}

/// A stored review.
///
/// Identity is the synthetic id assigned by the store; reviews are immutable
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Store-assigned id.
    pub id: ReviewId,
    /// Username of the review author.
    pub author: Username,
    /// Id of the reviewed game.
    pub game: GameId,
    /// Star rating.
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Review {}

impl Hash for Review {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
