//! Review rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a [`Rating`] out of range.
#[derive(thiserror::Error, Debug, Clone)]
#[error("rating must be between {} and {} (got {value})", Rating::MIN, Rating::MAX)]
pub struct RatingError {
    /// The rejected value.
    pub value: u8,
}

/// A review rating on the 1-5 star scale.
///
/// ## Examples
///
/// ```
/// use gamelib_core::Rating;
///
/// let rating = Rating::new(5).unwrap();
/// assert_eq!(rating.as_u8(), 5);
///
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: u8 = 1;
    /// Highest allowed rating.
    pub const MAX: u8 = 5;

    /// Create a `Rating`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if `value` is outside `1..=5`.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(RatingError { value });
        }

        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_in_range() {
        for value in Rating::MIN..=Rating::MAX {
            assert_eq!(Rating::new(value).unwrap().as_u8(), value);
        }
    }

    #[test]
    fn rejects_values_out_of_range() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn displays_as_fraction_of_max() {
        assert_eq!(Rating::new(4).unwrap().to_string(), "4/5");
    }
}
