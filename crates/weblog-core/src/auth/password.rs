//! Password hashing with Argon2id.
//!
//! Hashes are stored in PHC string format, so the parameters travel with
//! each hash and can be raised later without invalidating old records.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{Result, StoreError};

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| StoreError::Crypto(format!("password hashing failed: {}", err)))
}

/// Verify a plaintext password against a stored hash.
///
/// An unparsable stored hash verifies as false; the caller reports the
/// same generic failure either way.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
