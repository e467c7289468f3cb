use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Role, User};

/// Public view of an account. Also the profile the session client caches.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct UserResponse {
    #[schema(example = "65f1c0ffee00000000000001")]
    pub id: String,
    #[schema(example = "prover@example.com")]
    pub email: String,
    #[schema(example = "prover")]
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    /// Email ownership confirmed
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let created_at = DateTime::from_timestamp_millis(user.created_at.timestamp_millis())
            .unwrap_or_default();
        let id = user.id_hex();

        let User {
            email,
            username,
            role,
            is_active,
            is_verified,
            ..
        } = user;

        Self {
            id,
            email,
            username,
            role,
            is_active,
            is_verified,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_response_hides_secrets() {
        let created = mongodb::bson::DateTime::from_millis(1_700_000_000_123);
        let user = User {
            id: Some(ObjectId::new()),
            email: "prover@example.com".to_string(),
            username: "prover".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::ModelProvider,
            is_active: true,
            is_verified: false,
            api_key_hash: Some("digest".to_string()),
            created_at: created,
            updated_at: created,
            last_login: None,
        };
        let id = user.id_hex();

        let response = UserResponse::from(user);
        assert_eq!(response.id, id);
        assert_eq!(response.created_at.timestamp_millis(), 1_700_000_000_123);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("api_key_hash").is_none());
        assert_eq!(json["role"], "model_provider");
    }
}
