//! Password hashing backed by bcrypt.
//!
//! Hashes are salted per call and verification is constant-time inside bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AuthError;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` for a wrong password and `Err` only when `hash` is not a
/// bcrypt hash at all.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    verify(password, hash)
        .map_err(|e| AuthError::Internal(format!("Failed to verify password: {}", e)))
}
