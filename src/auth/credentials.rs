/// Credential Service
///
/// Registration and login, independent of the HTTP layer. Handlers call into
/// `CredentialService` and let `AppError` pick the response.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password};
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError, DatabaseError, ValidationError};
use crate::store::{NewUser, UserRecord, UserStore};

/// Request body shared by register and login. Both fields are optional at
/// the wire level so that absence is reported as a validation error.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields present and non-empty, or `MissingCredentials`
    fn require(self) -> Result<(String, String), ValidationError> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username, password))
            }
            _ => Err(ValidationError::MissingCredentials),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    settings: AuthSettings,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>, settings: AuthSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// Create a user and return the full stored record, hash included.
    ///
    /// # Errors
    /// - `Validation(MissingCredentials)` on absent or empty input
    /// - `Database(UniqueConstraintViolation)` if the username is taken
    /// - `Database(_)` / `Internal` on store or hashing faults
    pub async fn register(&self, credentials: Credentials) -> Result<UserRecord, AppError> {
        let (username, password) = credentials.require()?;

        if self.store.find_by_username(&username).await?.is_some() {
            return Err(DatabaseError::UniqueConstraintViolation(format!(
                "username {} already exists",
                username
            ))
            .into());
        }

        let cost = self.settings.hash_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

        // The store's own uniqueness check catches a registration that raced
        // past the lookup above.
        let id = self
            .store
            .insert(NewUser {
                username,
                password_hash,
            })
            .await?;

        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("user {} missing after insert", id)))?;

        tracing::info!(user_id = user.id, "User registered successfully");
        Ok(user)
    }

    /// Verify a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// `Auth(InvalidCredentials)`.
    pub async fn login(&self, credentials: Credentials) -> Result<LoginResponse, AppError> {
        let (username, password) = credentials.require()?;

        let user = match self.store.find_by_username(&username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username = %username, "Login attempt for unknown user");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let stored_hash = user.password_hash.clone();
        let password_valid =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await??;
        if !password_valid {
            tracing::warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = issue_token(&user, &self.settings)?;

        tracing::info!(user_id = user.id, "User logged in successfully");
        Ok(LoginResponse {
            message: format!("welcome, {}", user.username),
            token,
        })
    }
}
