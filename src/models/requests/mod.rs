//! Request models for API endpoints.

pub mod auth;

pub use auth::*;
