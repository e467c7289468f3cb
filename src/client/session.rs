//! Session state kept in three places: persistent local storage, the
//! mirrored cookie jar, and the in-memory state read by the API client.
//!
//! Writes go to all three; [`SessionStore::clear`] empties all three.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use crate::models::UserResponse;

use super::{ClientError, CookieJar, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Refreshing,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserResponse>,
}

pub struct SessionStore {
    local: Arc<dyn KeyValueStore>,
    cookies: CookieJar,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Empty, anonymous session over `local`.
    pub fn new(local: Arc<dyn KeyValueStore>) -> Self {
        Self {
            local,
            cookies: CookieJar::new(),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Rebuild a session from local storage and re-mirror its tokens into
    /// cookies. The session is authenticated only when both tokens and the
    /// user are present; an unreadable cached user is dropped.
    pub fn restore(local: Arc<dyn KeyValueStore>) -> Result<Self, ClientError> {
        let access_token = local.get(ACCESS_TOKEN_KEY)?;
        let refresh_token = local.get(REFRESH_TOKEN_KEY)?;
        let user = match local.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<UserResponse>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Discarding unreadable cached user: {}", e);
                    local.remove(USER_KEY)?;
                    None
                }
            },
            None => None,
        };

        let session = Self::new(local);
        if let Some(token) = &access_token {
            session.cookies.set(ACCESS_TOKEN_KEY, token);
        }
        if let Some(token) = &refresh_token {
            session.cookies.set(REFRESH_TOKEN_KEY, token);
        }

        let phase = if access_token.is_some() && refresh_token.is_some() && user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };
        debug!("Restored session in phase {:?}", phase);

        *session.state.write() = SessionState {
            phase,
            access_token,
            refresh_token,
            user,
        };
        Ok(session)
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.read().phase
    }

    pub fn set_phase(&self, phase: SessionPhase) {
        self.state.write().phase = phase;
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state.read().refresh_token.clone()
    }

    pub fn user(&self) -> Option<UserResponse> {
        self.state.read().user.clone()
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// `Cookie` header for navigation requests to guarded page routes.
    pub fn cookie_header(&self) -> Option<String> {
        self.cookies.cookie_header()
    }

    /// Store a token pair in local storage, cookies and memory.
    pub fn save_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), ClientError> {
        self.local.set(ACCESS_TOKEN_KEY, access_token)?;
        self.local.set(REFRESH_TOKEN_KEY, refresh_token)?;

        self.cookies.set(ACCESS_TOKEN_KEY, access_token);
        self.cookies.set(REFRESH_TOKEN_KEY, refresh_token);

        let mut state = self.state.write();
        state.access_token = Some(access_token.to_string());
        state.refresh_token = Some(refresh_token.to_string());
        Ok(())
    }

    pub fn save_user(&self, user: &UserResponse) -> Result<(), ClientError> {
        self.local.set(USER_KEY, &serde_json::to_string(user)?)?;
        self.state.write().user = Some(user.clone());
        Ok(())
    }

    /// Forget the session everywhere. Never fails: a local storage error is
    /// logged and the remaining locations are still cleared.
    pub fn clear(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.local.remove(key) {
                warn!("Failed to remove {} from local storage: {}", key, e);
            }
        }
        self.cookies.remove(ACCESS_TOKEN_KEY);
        self.cookies.remove(REFRESH_TOKEN_KEY);

        *self.state.write() = SessionState::default();
        debug!("Session cleared");
    }
}
