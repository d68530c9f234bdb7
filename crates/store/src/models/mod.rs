//! Domain entities for the games library.
//!
//! Identity rules (see the equality impls on each type):
//!
//! - [`Game`] - integer id
//! - [`Genre`] / [`Publisher`] - name
//! - [`User`] - lowercase username
//! - [`Review`] - store-assigned id
//! - [`Wishlist`] - owned by exactly one user, keyed externally by username

mod game;
mod review;
mod user;
mod wishlist;

pub use game::{Game, Genre, Platforms, Publisher};
pub use review::{NewReview, Review};
pub use user::User;
pub use wishlist::Wishlist;
