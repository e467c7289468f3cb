//! Authentication request models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Role;
use crate::validators::{validate_password_strength, validate_username_format};

/// Request payload for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Unique username (3-100 characters, letters, numbers, underscores, hyphens only)
    #[validate(
        length(
            min = 3,
            max = 100,
            message = "Username must be between 3 and 100 characters"
        ),
        custom(function = "validate_username_format")
    )]
    #[schema(example = "johndoe")]
    pub username: String,
    /// Password (8 characters to 72 bytes, with uppercase, lowercase and a digit)
    #[validate(custom(function = "validate_password_strength"))]
    #[schema(example = "SecurePass123")]
    pub password: String,
    /// Requested role, `user` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Request payload for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User's password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123")]
    pub password: String,
}

/// Request payload for exchanging a refresh token
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Optional logout payload; a refresh token sent here is revoked too
#[derive(Debug, Serialize, Deserialize, Default, ToSchema)]
pub struct LogoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
