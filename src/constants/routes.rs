//! Route classes, cookie names and local-storage keys.
//!
//! The route guard and the session client must agree on these names: the
//! client mirrors its tokens into the cookies the guard inspects.

/// Cookie and local-storage key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Cookie and local-storage key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Local-storage key holding the cached user profile.
pub const USER_KEY: &str = "user";

/// Lifetime of the mirrored session cookies (7 days).
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: [&str; 4] = ["/", "/auth", "/login", "/register"];

/// Routes an authenticated user is bounced away from.
pub const AUTH_ROUTES: [&str; 3] = ["/auth", "/login", "/register"];

/// Routes requiring a session. Each also covers its sub-paths.
pub const PROTECTED_ROUTES: [&str; 5] = [
    "/dashboard",
    "/models",
    "/verification",
    "/profile",
    "/settings",
];

/// Where unauthenticated visitors of a protected route are sent.
pub const LOGIN_ROUTE: &str = "/auth";
/// Query parameter carrying the originally requested path.
pub const REDIRECT_PARAM: &str = "redirect";
/// Where authenticated visitors of an auth route are sent.
pub const HOME_ROUTE: &str = "/dashboard";
