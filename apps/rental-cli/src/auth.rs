//! Password hashing.
//!
//! Passwords are stored as argon2id PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), each with its own
//! random salt. Plaintext never reaches the database or the logs.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::error::{AppError, AppResult};

/// Result of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Verified,
    Mismatch,
    /// The stored value is not a PHC hash this build can read.
    Malformed,
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash.
pub fn verify_password(password: &str, stored_hash: &str) -> PasswordCheck {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => return PasswordCheck::Malformed,
    };

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => PasswordCheck::Verified,
        Err(_) => PasswordCheck::Mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("cust123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_eq!(verify_password("cust123", &hash), PasswordCheck::Verified);
        assert_eq!(verify_password("cust124", &hash), PasswordCheck::Mismatch);
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("admin123").unwrap();
        let b = hash_password("admin123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_malformed() {
        assert_eq!(verify_password("x", "plaintext"), PasswordCheck::Malformed);
        assert_eq!(verify_password("x", ""), PasswordCheck::Malformed);
    }
}
