//! Success message constants used throughout the application.

// Authentication messages
pub const MSG_LOGOUT_SUCCESS: &str = "Successfully logged out";
pub const MSG_LOGOUT_DETAIL: &str = "Please discard your access token";
pub const MSG_API_KEY_CREATED: &str = "Store this API key securely. It will not be shown again.";

// Health messages
pub const MSG_SERVER_RUNNING: &str = "Server is running";
