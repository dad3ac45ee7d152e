/// Error Handling Module
///
/// Every failure the service can produce maps into `AppError`. The HTTP
/// boundary (`ResponseError`) is the only place that knows about status
/// codes and the fixed `{ "message": ... }` response bodies.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// ============================================================================
/// 1. DOMAIN-SPECIFIC ERROR TYPES
/// ============================================================================

/// Validation errors for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `username` or `password` absent or empty
    MissingCredentials,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingCredentials => write!(f, "username and password required"),
        }
    }
}

impl StdError for ValidationError {}

/// User store errors
#[derive(Debug)]
pub enum DatabaseError {
    UniqueConstraintViolation(String),
    QueryExecution(String),
    ConnectionPool(String),
    UnexpectedError(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::UniqueConstraintViolation(msg) => {
                write!(f, "Duplicate entry: {}", msg)
            }
            DatabaseError::QueryExecution(msg) => write!(f, "Query error: {}", msg),
            DatabaseError::ConnectionPool(msg) => write!(f, "Database connection error: {}", msg),
            DatabaseError::UnexpectedError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl StdError for DatabaseError {}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
    ParseError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl StdError for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Authentication errors
///
/// Unknown user and wrong password both surface as `InvalidCredentials`.
/// Every token verification failure surfaces as `TokenInvalid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    MissingToken,
    TokenInvalid,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "invalid credentials"),
            AuthError::MissingToken => write!(f, "token required"),
            AuthError::TokenInvalid => write!(f, "token invalid"),
        }
    }
}

impl StdError for AuthError {}

/// ============================================================================
/// 2. UNIFIED APPLICATION ERROR TYPE
/// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Database(DatabaseError),
    Auth(AuthError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Database(e) => write!(f, "{}", e),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

// ============================================================================
// FROM IMPLEMENTATIONS
// ============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                DatabaseError::UniqueConstraintViolation(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionPool(err.to_string())
            }
            sqlx::Error::Database(_) | sqlx::Error::ColumnDecode { .. } => {
                DatabaseError::QueryExecution(err.to_string())
            }
            _ => DatabaseError::UnexpectedError(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Blocking task failed: {}", err))
    }
}

// ============================================================================
// 3. HTTP RESPONSE MAPPING
// ============================================================================

/// Body of every error response
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

const INTERNAL_ERROR_MESSAGE: &str = "something went wrong";

impl AppError {
    /// Client-facing message. Never carries internals.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Database(DatabaseError::UniqueConstraintViolation(_)) => {
                "username taken".to_string()
            }
            AppError::Auth(e) => e.to_string(),
            AppError::Database(_) | AppError::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    fn log_error(&self, context: &ErrorContext) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(request_id = %context.request_id, error = %e, "Validation error");
            }
            AppError::Database(DatabaseError::UniqueConstraintViolation(_)) => {
                tracing::warn!(request_id = %context.request_id, error = %self, "Duplicate username attempt");
            }
            AppError::Database(e) => {
                tracing::error!(request_id = %context.request_id, error = %e, "Database error");
            }
            AppError::Auth(e) => {
                tracing::warn!(request_id = %context.request_id, error = %e, "Authentication error");
            }
            AppError::Internal(msg) => {
                tracing::error!(request_id = %context.request_id, error = %msg, "Internal error");
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.log_error(&ErrorContext::new());
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.public_message()))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(DatabaseError::UniqueConstraintViolation(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// ============================================================================
// 4. ERROR CONTEXT
// ============================================================================

/// Correlates a logged error with the response it produced
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::MissingCredentials;
        assert_eq!(err.to_string(), "username and password required");
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = AuthError::InvalidCredentials.into();
        match app_err {
            AppError::Auth(AuthError::InvalidCredentials) => (),
            _ => panic!("Expected Auth error"),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases: Vec<(AppError, u16, &str)> = vec![
            (
                ValidationError::MissingCredentials.into(),
                400,
                "username and password required",
            ),
            (
                DatabaseError::UniqueConstraintViolation("users_username_key".into()).into(),
                400,
                "username taken",
            ),
            (AuthError::InvalidCredentials.into(), 401, "invalid credentials"),
            (AuthError::MissingToken.into(), 401, "token required"),
            (AuthError::TokenInvalid.into(), 401, "token invalid"),
            (
                DatabaseError::ConnectionPool("connection refused".into()).into(),
                500,
                "something went wrong",
            ),
            (
                AppError::Internal("bcrypt exploded".into()),
                500,
                "something went wrong",
            ),
        ];

        for (err, status, message) in cases {
            assert_eq!(err.status_code().as_u16(), status, "status for {:?}", err);
            assert_eq!(err.public_message(), message);
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AppError::Database(DatabaseError::QueryExecution(
            "relation \"users\" does not exist".into(),
        ));
        assert!(!err.public_message().contains("users"));
    }

    #[test]
    fn test_error_context_creation() {
        let first = ErrorContext::new();
        let second = ErrorContext::new();
        assert_ne!(first.request_id, second.request_id);
    }
}
