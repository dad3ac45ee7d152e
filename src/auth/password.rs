/// Password Hashing and Verification
///
/// bcrypt with a per-call random salt embedded in the `$2b$` hash string.

use bcrypt::{hash, verify};

use crate::configuration::HashCost;
use crate::error::AppError;

/// Hash a password with the configured cost
pub fn hash_password(password: &str, cost: HashCost) -> Result<String, AppError> {
    hash(password, cost.get())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an internal error if the stored hash is not a valid bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}
