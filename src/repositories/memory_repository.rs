//! In-memory user repository for development runs and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;
use parking_lot::Mutex;

use crate::constants::{
    CODE_EMAIL_EXISTS, CODE_USERNAME_EXISTS, ERR_EMAIL_EXISTS, ERR_USERNAME_EXISTS,
};
use crate::errors::ApiError;
use crate::models::User;

use super::UserStore;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<ObjectId, User>,
    /// Serializes inserts so the uniqueness check and the write are atomic.
    insert_lock: Mutex<()>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_where(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    /// Flip the active flag; used to exercise deactivated-account paths.
    pub fn set_active(&self, id: ObjectId, is_active: bool) -> bool {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                user.is_active = is_active;
                user.updated_at = mongodb::bson::DateTime::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, ApiError> {
        let id = user.id.unwrap_or_else(ObjectId::new);
        let user = User {
            id: Some(id),
            email: user.email.to_lowercase(),
            ..user
        };

        let _guard = self.insert_lock.lock();
        if self.find_where(|u| u.email == user.email).is_some() {
            return Err(ApiError::bad_request(CODE_EMAIL_EXISTS, ERR_EMAIL_EXISTS));
        }
        if self.find_where(|u| u.username == user.username).is_some() {
            return Err(ApiError::bad_request(
                CODE_USERNAME_EXISTS,
                ERR_USERNAME_EXISTS,
            ));
        }
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, ApiError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.users.get(&object_id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let email = email.to_lowercase();
        Ok(self.find_where(|u| u.email == email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self.find_where(|u| u.username == username))
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, ApiError> {
        Ok(self.find_where(|u| u.api_key_hash.as_deref() == Some(hash)))
    }

    async fn set_api_key_hash(&self, id: ObjectId, hash: &str) -> Result<bool, ApiError> {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                user.api_key_hash = Some(hash.to_string());
                user.updated_at = mongodb::bson::DateTime::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_login(&self, id: ObjectId) -> Result<(), ApiError> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.last_login = Some(mongodb::bson::DateTime::now());
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(email: &str, username: &str) -> User {
        let now = mongodb::bson::DateTime::now();
        User {
            id: None,
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
            is_active: true,
            is_verified: false,
            api_key_hash: None,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_finds() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.insert(user("a@b.io", "alice")).await.unwrap();
        let id = saved.id_hex();
        assert!(!id.is_empty());

        assert!(repo.find_by_id(&id).await.unwrap().is_some());
        assert!(repo.find_by_email("A@B.io").await.unwrap().is_some());
        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_id("not-an-object-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_enforces_unique_email_and_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("a@b.io", "alice")).await.unwrap();

        let err = repo.insert(user("A@B.io", "other")).await.unwrap_err();
        assert_eq!(err.code(), CODE_EMAIL_EXISTS);

        let err = repo.insert(user("c@d.io", "alice")).await.unwrap_err();
        assert_eq!(err.code(), CODE_USERNAME_EXISTS);
        assert_eq!(repo.users.len(), 1);
    }

    #[tokio::test]
    async fn test_api_key_hash_lookup() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.insert(user("a@b.io", "alice")).await.unwrap();
        assert!(repo
            .set_api_key_hash(saved.id.unwrap(), "digest")
            .await
            .unwrap());
        let found = repo.find_by_api_key_hash("digest").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert!(!repo
            .set_api_key_hash(ObjectId::new(), "other")
            .await
            .unwrap());
    }
}
