//! Response models for API endpoints.

pub mod api;
pub mod auth;
pub mod user;

pub use api::*;
pub use auth::*;
pub use user::*;
