/// User Store
///
/// Persistence seam for user records. The credential service depends only on
/// the `UserStore` trait, so handlers and tests can run against either the
/// in-process store or Postgres.

mod memory;
mod postgres;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DatabaseError;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(rename = "passwordHash")]
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// A user that has not been assigned an id yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DatabaseError>;

    /// Persist a user and return its assigned id.
    ///
    /// # Errors
    /// `DatabaseError::UniqueConstraintViolation` if the username already exists.
    async fn insert(&self, user: NewUser) -> Result<i64, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, DatabaseError>;
}
