//! Price type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative (got {amount})")]
    Negative {
        /// The rejected amount.
        amount: f64,
    },
    /// The amount is NaN or infinite.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A non-negative game price.
///
/// The catalog source data uses plain decimal amounts without a currency, so
/// this type only enforces that the amount is finite and non-negative.
///
/// ## Examples
///
/// ```
/// use gamelib_core::Price;
///
/// let price = Price::new(9.99).unwrap();
/// assert_eq!(price.to_string(), "9.99");
///
/// assert!(Price::new(-1.0).is_err());
/// assert!(Price::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// A zero price (free game).
    pub const FREE: Self = Self(0.0);

    /// Create a `Price` from an amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, NaN, or infinite.
    pub fn new(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::NotFinite);
        }

        if amount < 0.0 {
            return Err(PriceError::Negative { amount });
        }

        Ok(Self(amount))
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_negative_amounts() {
        assert_eq!(Price::new(0.0).unwrap(), Price::FREE);
        assert_eq!(Price::new(9.99).unwrap().amount(), 9.99);
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(matches!(
            Price::new(-0.01),
            Err(PriceError::Negative { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_amounts() {
        assert!(matches!(Price::new(f64::NAN), Err(PriceError::NotFinite)));
        assert!(matches!(
            Price::new(f64::INFINITY),
            Err(PriceError::NotFinite)
        ));
    }

    #[test]
    fn displays_with_two_decimal_places() {
        assert_eq!(Price::new(5.0).unwrap().to_string(), "5.00");
    }
}
