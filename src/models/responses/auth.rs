//! Authentication response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Token pair issued on login and refresh
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct TokenResponse {
    /// Short-lived bearer credential
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Longer-lived credential for minting a new pair
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Newly generated API key
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiKeyResponse {
    #[schema(example = "vn_3q2-7wEcz...")]
    pub api_key: String,
    pub message: String,
}

/// Logout acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "Successfully logged out")]
    pub message: String,
    #[schema(example = "Please discard your access token")]
    pub detail: String,
}
