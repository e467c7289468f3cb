//! Session lifecycle: login, register, logout, profile and API keys.

use std::sync::Arc;

use log::{debug, info};
use reqwest::Method;
use serde_json::json;

use crate::models::{ApiKeyResponse, RegisterRequest, TokenResponse, UserResponse};
use crate::utils::mask_email;

use super::api::{API_KEY_PATH, LOGIN_PATH, LOGOUT_PATH, ME_PATH, REGISTER_PATH};
use super::{ApiClient, ClientError, HttpTransport, SessionPhase, SessionStore};

pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<SessionStore>) -> Self {
        Self {
            api: ApiClient::new(transport, session),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.api.session()
    }

    /// Exchange credentials for a token pair, then load the profile.
    /// On any failure the session is left cleared.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserResponse, ClientError> {
        let session = self.session();
        session.set_phase(SessionPhase::Authenticating);

        match self.sign_in(email, password).await {
            Ok(user) => {
                session.set_phase(SessionPhase::Authenticated);
                info!("Signed in as {}", mask_email(&user.email));
                Ok(user)
            }
            Err(e) => {
                debug!("Sign-in failed: {}", e);
                session.clear();
                Err(e)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserResponse, ClientError> {
        let tokens: TokenResponse = self
            .api
            .post(
                LOGIN_PATH,
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        self.session()
            .save_tokens(&tokens.access_token, &tokens.refresh_token)?;

        let user: UserResponse = self.api.get(ME_PATH).await?;
        self.session().save_user(&user)?;
        Ok(user)
    }

    /// Create the account, then sign in with the same credentials.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ClientError> {
        let created: UserResponse = self
            .api
            .post(REGISTER_PATH, Some(serde_json::to_value(request)?))
            .await?;
        debug!("Registered {}", mask_email(&created.email));

        self.login(&request.email, &request.password).await
    }

    /// Tell the server (best effort), then forget the session locally.
    pub async fn logout(&self) {
        let session = self.session();
        if session.access_token().is_some() {
            let body = session
                .refresh_token()
                .map(|token| json!({ "refresh_token": token }));
            if let Err(e) = self.api.request_once(Method::POST, LOGOUT_PATH, body).await {
                debug!("Server logout failed, clearing locally anyway: {}", e);
            }
        }
        session.clear();
        info!("Signed out");
    }

    /// Fetch the current user and refresh the cached copy.
    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        if self.session().access_token().is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        let user: UserResponse = self.api.get(ME_PATH).await?;
        self.session().save_user(&user)?;
        Ok(user)
    }

    pub async fn generate_api_key(&self) -> Result<ApiKeyResponse, ClientError> {
        if self.session().access_token().is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        self.api.post(API_KEY_PATH, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::tests::sample_user;
    use crate::client::transport::mock::{respond, FakeTransport};
    use crate::client::{KeyValueStore, MemoryStore};
    use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use serde_json::Value;

    fn token_pair() -> Value {
        json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "token_type": "bearer"
        })
    }

    fn user_json() -> Value {
        serde_json::to_value(sample_user()).unwrap()
    }

    fn client_with(
        script: Vec<Result<crate::client::TransportResponse, ClientError>>,
    ) -> (AuthClient, Arc<FakeTransport>, Arc<MemoryStore>) {
        let transport = Arc::new(FakeTransport::scripted(script));
        let local = Arc::new(MemoryStore::new());
        let session = Arc::new(SessionStore::new(local.clone()));
        (AuthClient::new(transport.clone(), session), transport, local)
    }

    #[tokio::test]
    async fn test_login_populates_all_locations() {
        let (client, transport, local) =
            client_with(vec![Ok(respond(200, token_pair())), Ok(respond(200, user_json()))]);

        let user = client.login("alice@example.com", "SecurePass123").await.unwrap();
        assert_eq!(user, sample_user());
        assert_eq!(transport.paths(), vec![LOGIN_PATH, ME_PATH]);
        assert_eq!(transport.requests()[1].bearer.as_deref(), Some("access-1"));

        let session = client.session();
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        for (key, expected) in [(ACCESS_TOKEN_KEY, "access-1"), (REFRESH_TOKEN_KEY, "refresh-1")] {
            assert_eq!(local.get(key).unwrap().as_deref(), Some(expected));
            assert_eq!(session.cookies().get(key).as_deref(), Some(expected));
        }
        assert_eq!(session.access_token().as_deref(), Some("access-1"));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));
        assert!(local.get(USER_KEY).unwrap().is_some());
        assert_eq!(session.user(), Some(sample_user()));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_anonymous() {
        let (client, transport, _) = client_with(vec![Ok(respond(
            401,
            json!({ "detail": "Incorrect email or password" }),
        ))]);

        let err = client.login("alice@example.com", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect email or password");
        assert_eq!(transport.paths(), vec![LOGIN_PATH]);
        assert_eq!(client.session().phase(), SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn test_profile_failure_after_tokens_clears_session() {
        let (client, _, local) = client_with(vec![
            Ok(respond(200, token_pair())),
            Ok(respond(403, json!({ "detail": "Inactive user" }))),
        ]);

        let err = client.login("alice@example.com", "SecurePass123").await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(local.get(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert!(client.session().cookies().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (client, transport, _) = client_with(vec![
            Ok(respond(201, user_json())),
            Ok(respond(200, token_pair())),
            Ok(respond(200, user_json())),
        ]);
        let request = RegisterRequest {
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            password: "SecurePass123".to_string(),
            role: None,
        };

        client.register(&request).await.unwrap();
        assert_eq!(transport.paths(), vec![REGISTER_PATH, LOGIN_PATH, ME_PATH]);
        assert!(client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let (client, transport, local) = client_with(vec![
            Ok(respond(200, token_pair())),
            Ok(respond(200, user_json())),
            Err(ClientError::Transport("connection refused".to_string())),
        ]);
        client.login("alice@example.com", "SecurePass123").await.unwrap();

        client.logout().await;

        let sent = transport.requests();
        assert_eq!(sent[2].path, LOGOUT_PATH);
        assert_eq!(sent[2].body, Some(json!({ "refresh_token": "refresh-1" })));
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            assert!(local.get(key).unwrap().is_none());
        }
        assert!(client.session().cookies().is_empty());
        assert_eq!(client.session().phase(), SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_does_not_refresh_on_401() {
        let (client, transport, _) = client_with(vec![
            Ok(respond(200, token_pair())),
            Ok(respond(200, user_json())),
            Ok(respond(401, json!({ "detail": "Token expired" }))),
        ]);
        client.login("alice@example.com", "SecurePass123").await.unwrap();

        client.logout().await;
        assert_eq!(transport.paths(), vec![LOGIN_PATH, ME_PATH, LOGOUT_PATH]);
        assert!(client.session().access_token().is_none());
    }

    #[tokio::test]
    async fn test_anonymous_calls_short_circuit() {
        let (client, transport, _) = client_with(vec![]);
        assert!(matches!(client.me().await, Err(ClientError::NotAuthenticated)));
        assert!(matches!(
            client.generate_api_key().await,
            Err(ClientError::NotAuthenticated)
        ));
        client.logout().await;
        assert!(transport.paths().is_empty());
    }

    #[tokio::test]
    async fn test_generate_api_key() {
        let (client, transport, _) = client_with(vec![
            Ok(respond(200, token_pair())),
            Ok(respond(200, user_json())),
            Ok(respond(
                200,
                json!({
                    "api_key": "vn_abc",
                    "message": "Store this API key securely. It will not be shown again."
                }),
            )),
        ]);
        client.login("alice@example.com", "SecurePass123").await.unwrap();

        let key = client.generate_api_key().await.unwrap();
        assert_eq!(key.api_key, "vn_abc");
        assert_eq!(transport.paths()[2], API_KEY_PATH);
    }
}
