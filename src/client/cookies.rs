//! Cookie jar mirroring the session tokens for route-guarded navigation.

use std::collections::BTreeMap;

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use parking_lot::RwLock;

use crate::constants::SESSION_COOKIE_MAX_AGE_SECS;

#[derive(Default)]
pub struct CookieJar {
    cookies: RwLock<BTreeMap<String, Cookie<'static>>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a session cookie: path `/`, `SameSite=Lax`, seven-day max-age.
    pub fn set(&self, name: &str, value: &str) {
        let cookie = Cookie::build(name.to_string(), value.to_string())
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE_SECS))
            .finish();
        self.cookies.write().insert(name.to_string(), cookie);
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .read()
            .get(name)
            .map(|c| c.value().to_string())
    }

    pub fn remove(&self, name: &str) {
        self.cookies.write().remove(name);
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.read().is_empty()
    }

    /// `Cookie` request header value, or `None` when the jar is empty.
    pub fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.read();
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .values()
                .map(|c| format!("{}={}", c.name(), c.value()))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// `Set-Cookie` header values for every cookie in the jar.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies.read().values().map(|c| c.to_string()).collect()
    }
}
