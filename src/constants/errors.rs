//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Not authenticated";
pub const ERR_INVALID_AUTH_HEADER: &str = "Missing or invalid authorization header";
pub const ERR_INVALID_TOKEN: &str = "Could not validate credentials";
pub const ERR_TOKEN_REVOKED: &str = "Token has been revoked";
pub const ERR_INVALID_API_KEY: &str = "Invalid API key";
pub const ERR_INVALID_CREDENTIALS: &str = "Incorrect email or password";
pub const ERR_ACCOUNT_INACTIVE: &str = "Account is inactive";
pub const ERR_INACTIVE_USER: &str = "Inactive user";

// User errors
pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_EMAIL_EXISTS: &str = "Email already registered";
pub const ERR_USERNAME_EXISTS: &str = "Username already taken";

// Authorization errors
pub const ERR_ADMIN_SELF_REGISTRATION: &str = "Administrator accounts cannot be self-registered";

// Validation errors
pub const ERR_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const ERR_PASSWORD_TOO_LONG: &str =
    "Password is too long. Use a maximum of 72 bytes (some special characters count as multiple bytes).";
pub const ERR_PASSWORD_DIGIT: &str = "Password must contain at least one digit";
pub const ERR_PASSWORD_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const ERR_PASSWORD_LOWERCASE: &str = "Password must contain at least one lowercase letter";
pub const ERR_INVALID_USERNAME_FORMAT: &str =
    "Username can only contain letters, numbers, underscores, and hyphens";

// Pages
pub const ERR_PAGE_NOT_FOUND: &str = "Page not found";
