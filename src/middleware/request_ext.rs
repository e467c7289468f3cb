//! Request extension trait for reading the authenticated identity.

use actix_web::HttpMessage;

use crate::models::AuthenticatedUser;

/// Extension trait for extracting the caller's identity from HTTP requests.
///
/// The identity is placed in the request extensions by the AuthMiddleware.
pub trait RequestExt {
    /// Returns `Some` if the request passed the AuthMiddleware.
    fn get_identity(&self) -> Option<AuthenticatedUser>;
}

impl RequestExt for actix_web::HttpRequest {
    fn get_identity(&self) -> Option<AuthenticatedUser> {
        self.extensions().get::<AuthenticatedUser>().cloned()
    }
}
