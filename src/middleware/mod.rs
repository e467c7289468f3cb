//! Request middleware: bearer/API-key authentication for the API,
//! cookie-based route guarding for page routes, and auth rate limiting.

pub mod auth_helpers;
pub mod auth_middleware;
pub mod rate_limiter;
pub mod request_ext;
pub mod route_guard;

pub use auth_helpers::*;
pub use auth_middleware::AuthMiddleware;
pub use rate_limiter::{create_auth_rate_limiter_config, AuthRateLimiterConfig};
pub use request_ext::RequestExt;
pub use route_guard::{guard_decision, RouteDecision, RouteGuard};
