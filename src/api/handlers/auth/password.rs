//! One-way password hashing and delegating verification.
//!
//! Stored hashes carry their algorithm identifier (PHC `$argon2id$...` or
//! bcrypt `$2b$...`), and verification dispatches on that prefix. New hashes
//! are always Argon2id; existing bcrypt credentials keep verifying, which
//! leaves a migration path to stronger algorithms open.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Verify a plaintext password against a stored hash.
///
/// Unknown hash formats verify as a mismatch rather than an error: a record
/// with a corrupt hash behaves like a wrong password.
#[must_use]
pub(crate) fn verify_password(password: &str, stored_hash: &str) -> bool {
    if stored_hash.starts_with("$argon2") {
        return PasswordHash::new(stored_hash).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        });
    }

    if stored_hash.starts_with("$2a$")
        || stored_hash.starts_with("$2b$")
        || stored_hash.starts_with("$2y$")
    {
        return bcrypt::verify(password, stored_hash).unwrap_or(false);
    }

    false
}

/// Hash a password with Argon2id. Used only when seeding administrators.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash password: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_hash_verifies() {
        let hash = hash_password("admin123").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn bcrypt_hash_verifies_via_dispatch() {
        // Minimum cost keeps the test fast; the prefix dispatch is what matters.
        let hash = bcrypt::hash("user123", 4).expect("bcrypt hash");
        assert!(verify_password("user123", &hash));
        assert!(!verify_password("not-the-password", &hash));
    }

    #[test]
    fn unknown_scheme_is_a_mismatch() {
        assert!(!verify_password("admin123", "{noop}admin123"));
        assert!(!verify_password("admin123", ""));
        assert!(!verify_password("admin123", "$pbkdf2$bogus"));
    }

    #[test]
    fn empty_password_does_not_verify() {
        let hash = hash_password("admin123").expect("hash");
        assert!(!verify_password("", &hash));
    }
}
