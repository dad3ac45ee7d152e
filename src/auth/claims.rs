/// Token Claims
///
/// Payload of a session token: the user's id and username plus the standard
/// issued-at and expiry timestamps (RFC 7519).

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub subject: i64,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `expiry_seconds` from now
    pub fn new(subject: i64, username: String, expiry_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            subject,
            username,
            iat: now,
            exp: now + expiry_seconds,
        }
    }
}
