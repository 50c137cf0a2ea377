use std::sync::OnceLock;

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;

use crate::error::ApiError;

/// Hashes a plaintext password with a fresh random salt, returning the PHC
/// string form.
pub fn hash(plaintext: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Hash(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC hash. An unparseable
/// hash counts as a non-match.
pub fn verify(plaintext: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// A real hash of a fixed password nobody holds. Login verifies against this
/// when the username does not exist, so the unknown-username path costs the
/// same as the wrong-password path.
pub fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash("speak-friend-and-enter").unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hashed = hash("pw1").unwrap();
        assert!(verify("pw1", &hashed));
    }

    #[test]
    fn wrong_password_fails() {
        let hashed = hash("pw1").unwrap();
        assert!(!verify("pw2", &hashed));
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash("pw1").unwrap(), hash("pw1").unwrap());
    }

    #[test]
    fn garbage_hash_never_matches() {
        assert!(!verify("pw1", "not-a-phc-string"));
        assert!(!verify("pw1", ""));
    }

    #[test]
    fn dummy_hash_matches_nothing_usable() {
        assert!(!verify("pw1", dummy_hash()));
        assert!(!verify("", dummy_hash()));
    }
}
