//! Authorized API calls with refresh-on-401.
//!
//! Every call carries the session's access token. A 401 on anything but the
//! credential endpoints triggers one refresh and one retry; a second 401 is
//! handed back to the caller. A failed refresh clears the session.

use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::models::TokenResponse;

use super::{
    ClientError, HttpTransport, SessionPhase, SessionStore, TransportRequest, TransportResponse,
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const ME_PATH: &str = "/auth/me";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const API_KEY_PATH: &str = "/auth/api-key";

const UNAUTHORIZED: u16 = 401;

/// Credential endpoints answer 401 for bad input, not for a stale token.
fn skips_refresh(path: &str) -> bool {
    [LOGIN_PATH, REGISTER_PATH, REFRESH_PATH].contains(&path)
}

pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<SessionStore>) -> Self {
        Self {
            transport,
            session,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let body = self.request(Method::GET, path, None).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let body = self.request(Method::POST, path, body).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Send an authorized request, refreshing once on 401.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let token = self.session.access_token();
        let response = self
            .send(method.clone(), path, body.clone(), token.clone())
            .await?;

        if response.status != UNAUTHORIZED || skips_refresh(path) {
            return into_result(response);
        }

        debug!("{} {} returned 401, refreshing", method, path);
        let fresh = self.refresh_access_token(token.as_deref()).await?;
        let retried = self.send(method, path, body, Some(fresh)).await?;
        if retried.status == UNAUTHORIZED {
            warn!("{} still unauthorized after refresh", path);
        }
        into_result(retried)
    }

    /// Send an authorized request without the refresh fallback.
    pub async fn request_once(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let token = self.session.access_token();
        into_result(self.send(method, path, body, token).await?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<String>,
    ) -> Result<TransportResponse, ClientError> {
        self.transport
            .send(TransportRequest {
                method,
                path: path.to_string(),
                body,
                bearer,
            })
            .await
    }

    /// Exchange the stored refresh token for a new pair and return the new
    /// access token. Concurrent callers share one exchange: whoever takes the
    /// lock after a rotation reuses its result instead of spending the
    /// already-rotated refresh token.
    async fn refresh_access_token(&self, failed_token: Option<&str>) -> Result<String, ClientError> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token() {
            if failed_token != Some(current.as_str()) {
                debug!("Access token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            info!("No refresh token, clearing session");
            self.session.clear();
            return Err(ClientError::SessionExpired);
        };

        let previous_phase = self.session.phase();
        self.session.set_phase(SessionPhase::Refreshing);
        let outcome = self
            .send(
                Method::POST,
                REFRESH_PATH,
                Some(json!({ "refresh_token": refresh_token })),
                None,
            )
            .await
            .and_then(into_result)
            .and_then(|body| Ok(serde_json::from_value::<TokenResponse>(body)?))
            .and_then(|tokens| {
                self.session
                    .save_tokens(&tokens.access_token, &tokens.refresh_token)?;
                Ok(tokens.access_token)
            });

        match outcome {
            Ok(access_token) => {
                self.session.set_phase(previous_phase);
                debug!("Session refreshed");
                Ok(access_token)
            }
            Err(e) => {
                info!("Refresh failed ({}), clearing session", e);
                self.session.clear();
                Err(ClientError::SessionExpired)
            }
        }
    }
}

fn into_result(response: TransportResponse) -> Result<Value, ClientError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ClientError::from_response(response.status, &response.body))
    }
}
