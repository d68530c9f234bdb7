//! Password hashing helpers.
//!
//! Hashing is a boundary concern: whichever collaborator accepts a raw
//! credential (the bulk loader, a registration handler) hashes it here before
//! constructing a [`crate::models::User`]. Entities and repositories only
//! ever see Argon2 hashes; plaintext passwords are never persisted.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during credential handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password too weak or invalid.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Wrong password or malformed stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Validate a raw password against the strength policy.
///
/// # Errors
///
/// Returns [`AuthError::WeakPassword`] if the password is shorter than
/// [`MIN_PASSWORD_LENGTH`].
pub const fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns [`AuthError::PasswordHash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] if the hash is malformed or the
/// password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(verify_password("wrong password", &hash).is_err());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw123456").unwrap();
        let b = hash_password("pw123456").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword)
        ));
        assert!(validate_password("long enough").is_ok());
    }
}
