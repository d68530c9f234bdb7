//! Core types for the games library.
//!
//! Validated newtype wrappers shared by every backend. Parsing happens once at
//! the boundary; the rest of the code can rely on the invariants.

mod id;
mod price;
mod rating;
mod username;

pub use id::{GameId, ReviewId};
pub use price::{Price, PriceError};
pub use rating::{Rating, RatingError};
pub use username::{Username, UsernameError};
