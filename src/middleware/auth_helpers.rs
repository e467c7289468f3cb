//! Authentication helper functions for handlers.

use actix_web::HttpRequest;
use log::warn;

use crate::constants::{CODE_AUTH_REQUIRED, ERR_AUTH_REQUIRED};
use crate::errors::ApiError;
use crate::models::AuthenticatedUser;

use super::RequestExt;

/// Extract the caller's identity or return Unauthorized.
///
/// Use this at the start of any handler mounted behind the AuthMiddleware.
///
/// # Example
/// ```ignore
/// let identity = require_auth(&req)?;
/// ```
pub fn require_auth(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    req.get_identity().ok_or_else(|| {
        warn!("No authenticated identity on request to {}", req.path());
        ApiError::unauthorized(CODE_AUTH_REQUIRED, ERR_AUTH_REQUIRED)
    })
}
