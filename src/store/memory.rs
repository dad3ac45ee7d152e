use std::sync::RwLock;

use async_trait::async_trait;

use super::{NewUser, UserRecord, UserStore};
use crate::error::DatabaseError;

/// In-process user store. Ids start at 1 and increase by one per insert.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> DatabaseError {
    DatabaseError::UnexpectedError("user store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<i64, DatabaseError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::UniqueConstraintViolation(format!(
                "username {} already exists",
                user.username
            )));
        }

        let id = users.last().map_or(1, |u| u.id + 1);
        users.push(UserRecord {
            id,
            username: user.username,
            password_hash: user.password_hash,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, DatabaseError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.insert(new_user("a")).await.unwrap(), 1);
        assert_eq!(store.insert(new_user("b")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_lookup_by_username_and_id() {
        let store = InMemoryUserStore::new();
        let id = store.insert(new_user("user1")).await.unwrap();

        let by_name = store.find_by_username("user1").await.unwrap().unwrap();
        let by_id = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_name, by_id);
        assert!(store.find_by_username("nobody").await.unwrap().is_none());
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("user1")).await.unwrap();

        let result = store.insert(new_user("user1")).await;
        assert!(matches!(
            result,
            Err(DatabaseError::UniqueConstraintViolation(_))
        ));
    }
}
