//! Salted password hashing with Argon2id
//!
//! Hashes are stored as PHC strings, so algorithm, parameters and salt travel
//! with the hash.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Failed to hash password: {}", e))
}

/// Check a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch. The digest comparison inside argon2 is
/// constant-time.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| format!("Stored hash is not a valid PHC string: {}", e))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(format!("Failed to verify password: {}", e)),
    }
}

/// Run one verification against a throwaway hash and return `false`.
///
/// Used when no account matched, so an unknown email costs the same argon2
/// work as a wrong password.
pub fn verify_against_placeholder(password: &str) -> bool {
    static PLACEHOLDER_HASH: OnceLock<Option<String>> = OnceLock::new();

    let hash = PLACEHOLDER_HASH.get_or_init(|| hash_password("placeholder-account-password").ok());
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
    false
}
