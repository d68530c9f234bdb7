//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty (or whitespace only).
    #[error("username cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace between characters.
    #[error("username cannot contain whitespace")]
    ContainsWhitespace,
}

/// A username.
///
/// Usernames are normalized to lowercase at construction, so two spellings
/// that differ only in case refer to the same user. Lookups that go through
/// [`Username::parse`] are therefore case-insensitive.
///
/// ## Constraints
///
/// - Length: 1-255 characters after trimming
/// - No interior whitespace
///
/// ## Examples
///
/// ```
/// use gamelib_core::Username;
///
/// let a = Username::parse("Thorke").unwrap();
/// let b = Username::parse("thorke").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "thorke");
///
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse("   ").is_err());
/// assert!(Username::parse("two words").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `Username` from a string, trimming surrounding whitespace and
    /// lowercasing the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or whitespace only
    /// - Is longer than 255 characters
    /// - Contains interior whitespace
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(UsernameError::ContainsWhitespace);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_lowercase() {
        let username = Username::parse("Shyamli").unwrap();
        assert_eq!(username.as_str(), "shyamli");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let username = Username::parse("  thorke  ").unwrap();
        assert_eq!(username.as_str(), "thorke");
    }

    #[test]
    fn equal_regardless_of_input_case() {
        assert_eq!(
            Username::parse("Thorke").unwrap(),
            Username::parse("thorke").unwrap()
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(Username::parse(""), Err(UsernameError::Empty)));
        assert!(matches!(Username::parse("   "), Err(UsernameError::Empty)));
    }

    #[test]
    fn rejects_interior_whitespace() {
        assert!(matches!(
            Username::parse("two words"),
            Err(UsernameError::ContainsWhitespace)
        ));
    }

    #[test]
    fn rejects_overlong_input() {
        let long = "a".repeat(Username::MAX_LENGTH + 1);
        assert!(matches!(
            Username::parse(&long),
            Err(UsernameError::TooLong { .. })
        ));
    }
}
