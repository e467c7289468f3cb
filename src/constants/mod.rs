//! Application constants module.
//!
//! This module centralizes the constant strings used throughout the application:
//! error messages and codes, success messages, collection names and the
//! route/storage names shared by the route guard and the session client.

pub mod collections;
pub mod error_codes;
pub mod errors;
pub mod messages;
pub mod routes;

pub use collections::*;
pub use error_codes::*;
pub use errors::*;
pub use messages::*;
pub use routes::*;
