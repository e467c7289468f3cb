//! Session client for the VeraNode API.
//!
//! [`AuthClient`] drives the session lifecycle over an [`HttpTransport`];
//! [`SessionStore`] keeps the token pair in local storage, a cookie jar and
//! memory, so page navigations pass the server's route guard.

pub mod api;
pub mod auth;
pub mod cookies;
pub mod errors;
pub mod session;
pub mod storage;
pub mod transport;

pub use api::ApiClient;
pub use auth::AuthClient;
pub use cookies::CookieJar;
pub use errors::{extract_error_message, ClientError};
pub use session::{SessionPhase, SessionState, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
