/// Token Issuance and Validation
///
/// Session tokens are HS256 JWTs signed with the configured secret.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError};
use crate::store::UserRecord;

/// Issue a signed token for a user
///
/// # Errors
/// Returns an internal error if encoding fails
pub fn issue_token(user: &UserRecord, config: &AuthSettings) -> Result<String, AppError> {
    let claims = Claims::new(user.id, user.username.clone(), config.token_expiry_seconds);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Validate a token and extract its claims
///
/// Bad signature, malformed structure and expiry all collapse into
/// `AuthError::TokenInvalid`; the underlying reason is only logged.
pub fn validate_token(token: &str, config: &AuthSettings) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!(reason = %e, "Token validation failed");
        AuthError::TokenInvalid
    })
}
