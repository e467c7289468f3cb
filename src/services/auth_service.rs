//! Authentication service: registration, login, refresh rotation, logout,
//! API keys and request authentication.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bcrypt::{hash, verify};
use log::{debug, info, warn};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::constants::{
    CODE_ACCOUNT_INACTIVE, CODE_EMAIL_EXISTS, CODE_FORBIDDEN, CODE_INVALID_API_KEY,
    CODE_INVALID_CREDENTIALS, CODE_INVALID_TOKEN, CODE_TOKEN_REVOKED, CODE_USERNAME_EXISTS,
    CODE_USER_NOT_FOUND, ERR_ACCOUNT_INACTIVE, ERR_ADMIN_SELF_REGISTRATION, ERR_EMAIL_EXISTS,
    ERR_INACTIVE_USER, ERR_INVALID_API_KEY, ERR_INVALID_CREDENTIALS, ERR_INVALID_TOKEN,
    ERR_TOKEN_REVOKED, ERR_USERNAME_EXISTS, ERR_USER_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::{
    AuthenticatedUser, LoginRequest, RefreshRequest, RegisterRequest, Role, TokenResponse,
    TokenType, User,
};
use crate::repositories::UserStore;
use crate::services::{TokenBlacklist, TokenService};
use crate::utils::{mask_email, mask_secret};

pub const API_KEY_PREFIX: &str = "vn_";
const API_KEY_BYTES: usize = 32;

/// Service for authentication operations.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
    blacklist: TokenBlacklist,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        tokens: TokenService,
        blacklist: TokenBlacklist,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            store,
            tokens,
            blacklist,
            bcrypt_cost,
        }
    }

    /// Create a user account. Admin accounts cannot be self-registered.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, ApiError> {
        let role = req.role.unwrap_or_default();
        if role.is_admin() {
            warn!(
                "Rejected admin self-registration for {}",
                mask_email(&req.email)
            );
            return Err(ApiError::forbidden(
                CODE_FORBIDDEN,
                ERR_ADMIN_SELF_REGISTRATION,
            ));
        }

        if self.store.find_by_email(&req.email).await?.is_some() {
            return Err(ApiError::bad_request(CODE_EMAIL_EXISTS, ERR_EMAIL_EXISTS));
        }

        if self.store.find_by_username(&req.username).await?.is_some() {
            return Err(ApiError::bad_request(
                CODE_USERNAME_EXISTS,
                ERR_USERNAME_EXISTS,
            ));
        }

        let password_hash = hash(&req.password, self.bcrypt_cost)?;

        let now = mongodb::bson::DateTime::now();
        let user = self
            .store
            .insert(User {
                id: None,
                email: req.email.to_lowercase(),
                username: req.username,
                password_hash,
                role,
                is_active: true,
                is_verified: false,
                api_key_hash: None,
                created_at: now,
                updated_at: now,
                last_login: None,
            })
            .await?;

        info!(
            "Registered user {} with role {}",
            mask_email(&user.email),
            user.role
        );
        Ok(user)
    }

    /// Verify credentials and issue a token pair.
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, ApiError> {
        let invalid = || ApiError::unauthorized(CODE_INVALID_CREDENTIALS, ERR_INVALID_CREDENTIALS);

        let user = self.store.find_by_email(&req.email).await?.ok_or_else(|| {
            debug!("Login failed: unknown email {}", mask_email(&req.email));
            invalid()
        })?;

        if !verify(&req.password, &user.password_hash)? {
            debug!("Login failed: wrong password for {}", mask_email(&req.email));
            return Err(invalid());
        }

        if !user.is_active {
            return Err(ApiError::forbidden(
                CODE_ACCOUNT_INACTIVE,
                ERR_ACCOUNT_INACTIVE,
            ));
        }

        if let Some(id) = user.id {
            self.store.record_login(id).await?;
        }

        info!("User {} logged in", mask_email(&user.email));
        self.tokens.issue_pair(&user)
    }

    /// Exchange a refresh token for a new pair. The presented token is
    /// revoked, so each refresh token can be used once.
    pub async fn refresh(&self, req: RefreshRequest) -> Result<TokenResponse, ApiError> {
        let claims = self.tokens.decode(&req.refresh_token, TokenType::Refresh)?;

        // Spend the token before any await so a concurrent replay loses
        if !self.blacklist.revoke(&claims.jti, claims.exp).await {
            warn!("Reuse of revoked refresh token for user {}", claims.sub);
            return Err(ApiError::unauthorized(CODE_TOKEN_REVOKED, ERR_TOKEN_REVOKED));
        }

        let user = self.active_user(&claims.sub).await?;
        debug!("Rotated refresh token for user {}", claims.sub);

        self.tokens.issue_pair(&user)
    }

    /// Resolve a bearer access token to its user.
    pub async fn authenticate_bearer(&self, token: &str) -> Result<AuthenticatedUser, ApiError> {
        let claims = self.tokens.decode(token, TokenType::Access)?;

        if self.blacklist.is_blacklisted(&claims.jti) {
            return Err(ApiError::unauthorized(CODE_TOKEN_REVOKED, ERR_TOKEN_REVOKED));
        }

        let user = self.active_user(&claims.sub).await?;
        Ok(AuthenticatedUser {
            user,
            claims: Some(claims),
        })
    }

    /// Resolve an API key to its user.
    pub async fn authenticate_api_key(&self, api_key: &str) -> Result<AuthenticatedUser, ApiError> {
        let user = self
            .store
            .find_by_api_key_hash(&hash_api_key(api_key))
            .await?
            .ok_or_else(|| ApiError::unauthorized(CODE_INVALID_API_KEY, ERR_INVALID_API_KEY))?;

        if !user.is_active {
            return Err(ApiError::forbidden(CODE_ACCOUNT_INACTIVE, ERR_INACTIVE_USER));
        }

        Ok(AuthenticatedUser { user, claims: None })
    }

    /// Generate a new API key for the user, replacing any previous one.
    /// Only the digest is stored; the key itself is returned once.
    pub async fn generate_api_key(&self, user: &User) -> Result<String, ApiError> {
        let id = user
            .id
            .ok_or_else(|| ApiError::not_found(CODE_USER_NOT_FOUND, ERR_USER_NOT_FOUND))?;

        let api_key = new_api_key();
        if !self.store.set_api_key_hash(id, &hash_api_key(&api_key)).await? {
            return Err(ApiError::not_found(CODE_USER_NOT_FOUND, ERR_USER_NOT_FOUND));
        }

        info!(
            "Generated API key {} for user {}",
            mask_secret(&api_key),
            id.to_hex()
        );
        Ok(api_key)
    }

    /// Revoke the caller's access token and, when given and owned by the
    /// caller, its refresh token. Invalid refresh tokens are ignored.
    pub async fn logout(&self, identity: &AuthenticatedUser, refresh_token: Option<&str>) {
        if let Some(claims) = &identity.claims {
            self.blacklist.blacklist_token(&claims.jti, claims.exp).await;
        }

        let user_id = identity.user.id_hex();
        if let Some(token) = refresh_token {
            match self.tokens.decode(token, TokenType::Refresh) {
                Ok(claims) if claims.is_user(&user_id) => {
                    self.blacklist.blacklist_token(&claims.jti, claims.exp).await;
                }
                Ok(_) => warn!("User {} tried to revoke a foreign refresh token", user_id),
                Err(_) => debug!("Ignoring invalid refresh token on logout"),
            }
        }

        info!("User {} logged out", user_id);
    }

    /// Round trip to the user store.
    pub async fn ping_store(&self) -> Result<(), ApiError> {
        self.store.ping().await
    }

    async fn active_user(&self, user_id: &str) -> Result<User, ApiError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN))?;

        if !user.is_active {
            return Err(ApiError::forbidden(CODE_ACCOUNT_INACTIVE, ERR_INACTIVE_USER));
        }
        Ok(user)
    }
}

fn new_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}{}", API_KEY_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}

/// SHA-256 hex digest under which an API key is stored.
pub fn hash_api_key(api_key: &str) -> String {
    hex::encode(Sha256::digest(api_key.as_bytes()))
}
