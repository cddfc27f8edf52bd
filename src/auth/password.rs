//! Password Hashing
//! Mission: One-way bcrypt hashing and verification of user passwords

use thiserror::Error;

/// Cost used when no explicit cost is configured
pub const DEFAULT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt cost {0} outside supported range 4..=31")]
    InvalidCost(u32),
    #[error("failed to hash password")]
    Hash(#[source] bcrypt::BcryptError),
    #[error("stored password hash is malformed")]
    MalformedHash(#[source] bcrypt::BcryptError),
}

/// Hash a plaintext password with a random salt.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, PasswordError> {
    if !(4..=31).contains(&cost) {
        return Err(PasswordError::InvalidCost(cost));
    }
    bcrypt::hash(plaintext, cost).map_err(PasswordError::Hash)
}

/// Compare a plaintext candidate against a stored bcrypt hash.
///
/// A mismatch is `Ok(false)`; only an unparseable stored hash is an error.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plaintext, stored_hash).map_err(PasswordError::MalformedHash)
}
