//! VeraNode authentication service and session client.
//!
//! The server half (actix-web) issues and validates bearer credentials and
//! guards page routes; the [`client`] half keeps a session's token pair in
//! local storage, cookies and memory, refreshing it once on 401.

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
pub mod validators;
