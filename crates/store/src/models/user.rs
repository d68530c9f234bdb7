//! User domain type.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use gamelib_core::Username;

/// A registered user.
///
/// Identity is the username (already lowercase, see
/// [`Username::parse`]); the password hash is ignored by equality.
///
/// The `password_hash` field holds an already-hashed credential. Hashing is a
/// boundary concern: whoever accepts a raw password (the bulk loader, a
/// registration handler) runs it through [`crate::auth::hash_password`] before
/// constructing a `User`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique lowercase username.
    pub username: Username,
    /// Argon2 password hash.
    pub password_hash: String,
}

impl User {
    /// Create a user from a parsed username and an already-hashed password.
    #[must_use]
    pub const fn new(username: Username, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.username.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_password_hash() {
        let a = User::new(Username::parse("thorke").unwrap(), "hash-a".to_owned());
        let b = User::new(Username::parse("Thorke").unwrap(), "hash-b".to_owned());
        assert_eq!(a, b);
    }
}
