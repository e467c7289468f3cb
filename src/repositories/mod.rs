//! Repository layer for user persistence.
//!
//! Services talk to the [`UserStore`] trait; MongoDB backs production and an
//! in-memory map backs development runs and tests.

pub mod memory_repository;
pub mod user_repository;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::ApiError;
use crate::models::User;

pub use memory_repository::InMemoryUserRepository;
pub use user_repository::UserRepository;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return it with its assigned id.
    async fn insert(&self, user: User) -> Result<User, ApiError>;

    /// Find a user by the hex form of its id. Malformed ids find nothing.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, ApiError>;

    /// Find a user by email address (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, ApiError>;

    /// Replace the stored API key digest. Returns false when the user is gone.
    async fn set_api_key_hash(&self, id: ObjectId, hash: &str) -> Result<bool, ApiError>;

    async fn record_login(&self, id: ObjectId) -> Result<(), ApiError>;

    /// Cheap round trip used by the detailed health check.
    async fn ping(&self) -> Result<(), ApiError>;
}
