use bcrypt::{hash, verify, DEFAULT_COST};

use super::AuthError;

/// Hash a password for storage with the default bcrypt work factor
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    hash(password, cost).map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Check `password` against a stored bcrypt hash. The cost is read from the hash.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    verify(password, stored).map_err(|e| AuthError::PasswordHash(e.to_string()))
}
