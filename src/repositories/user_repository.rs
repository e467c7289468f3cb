//! MongoDB-backed user repository.

use async_trait::async_trait;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_USERS;
use crate::errors::ApiError;
use crate::models::User;

use super::UserStore;

/// Repository for user-related database operations.
pub struct UserRepository {
    db: Database,
    collection: Collection<User>,
}

impl UserRepository {
    /// Create a new UserRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(COLLECTION_USERS),
        }
    }

    /// Create database indexes for commonly queried fields.
    ///
    /// This method should be called once during application startup. It creates:
    /// - Unique index on `email`
    /// - Unique index on `username`
    /// - Unique sparse index on `api_key_hash`
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for users collection...");

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "api_key_hash": 1 })
                .options(IndexOptions::builder().unique(true).sparse(true).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        info!("Database indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: User) -> Result<User, ApiError> {
        let result = self.collection.insert_one(&user).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal("Inserted user has no ObjectId"))?;
        Ok(User {
            id: Some(id),
            ..user
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by ID: {}", id);
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! { "email": email.to_lowercase() })
            .await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by username: {}", username);
        Ok(self
            .collection
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! { "api_key_hash": hash })
            .await?)
    }

    async fn set_api_key_hash(&self, id: ObjectId, hash: &str) -> Result<bool, ApiError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "api_key_hash": hash,
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn record_login(&self, id: ObjectId) -> Result<(), ApiError> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "last_login": mongodb::bson::DateTime::now() } },
            )
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
