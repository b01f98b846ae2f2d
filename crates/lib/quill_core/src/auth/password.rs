//! Salted password hashes.
//!
//! Hashes are bcrypt strings with the salt and cost embedded, so checking a
//! password needs nothing but the stored hash.

use super::AuthError;

/// Fixed bcrypt work factor for every stored password.
pub const HASH_COST: u32 = 10;

/// One-way salted hash of `plaintext`.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, HASH_COST).map_err(|e| AuthError::Internal(format!("hash: {e}")))
}

/// Whether `plaintext` matches `hash`. A hash that is not valid bcrypt is an error,
/// not a mismatch.
pub fn check_password(plaintext: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, hash)
        .map_err(|e| AuthError::Internal(format!("stored hash unreadable: {e}")))
}
