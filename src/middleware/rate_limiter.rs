//! Rate limiting for authentication endpoints.
//!
//! Protects login, registration and refresh against brute-force attempts.

use actix_governor::governor::clock::QuantaInstant;
use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};

/// Per-peer-IP limiter shared by the public auth endpoints.
pub type AuthRateLimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Create rate limiter configuration for authentication endpoints.
///
/// Allows a burst of 5 requests with 1 request replenished every 6 seconds
/// (10 per minute) per peer IP. Build it once, outside the `HttpServer`
/// factory, so every worker draws from the same quota.
///
/// Usage:
/// ```ignore
/// let config = create_auth_rate_limiter_config();
/// web::resource("/login").wrap(Governor::new(&config))
/// ```
pub fn create_auth_rate_limiter_config() -> AuthRateLimiterConfig {
    GovernorConfigBuilder::default()
        .seconds_per_request(6)
        .burst_size(5)
        .finish()
        .unwrap_or_default()
}
