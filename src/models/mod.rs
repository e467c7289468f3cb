//! Data models organized by type.

pub mod claims;
pub mod requests;
pub mod responses;
pub mod user;

pub use claims::*;
pub use requests::{LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest};
pub use responses::{
    ApiKeyResponse, DatabaseHealth, DetailedHealthResponse, ErrorResponse, HealthResponse,
    LogoutResponse, TokenResponse, UserResponse,
};
pub use user::*;
