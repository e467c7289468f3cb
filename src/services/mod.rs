//! Services organized by domain concern.

pub mod auth_service;
pub mod token_blacklist;
pub mod token_service;

pub use auth_service::AuthService;
pub use token_blacklist::TokenBlacklist;
pub use token_service::TokenService;
