//! Password credentials: Argon2id hashing and the registration policy.
//!
//! Hashes are PHC strings, so salt and parameters travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use taskboard_core::error::CoreError;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check a plaintext password against a stored hash.
///
/// A mismatch is `Ok(false)`; only an unreadable hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Rules a new password must satisfy.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl PasswordPolicy {
    pub fn check(&self, password: &str) -> Result<(), CoreError> {
        if password.chars().count() < self.min_length {
            return Err(CoreError::Validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hash_is_argon2id_and_matches_only_its_password() {
        let hash = hash_password("correct-horse-battery").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        assert_ne!(hash_password("repeat").unwrap(), hash_password("repeat").unwrap());
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(verify_password("anything", "plaintext-in-the-db").is_err());
    }

    #[test]
    fn policy_counts_characters_not_bytes() {
        let policy = PasswordPolicy { min_length: 8 };

        assert_matches!(policy.check("short"), Err(CoreError::Validation(_)));
        assert!(policy.check("eightchr").is_ok());
        assert!(policy.check("éééééééé").is_ok());
        assert_matches!(policy.check("éééé"), Err(CoreError::Validation(_)));
    }
}
