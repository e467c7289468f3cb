//! JWT issuing and validation for access and refresh tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::constants::{CODE_INVALID_TOKEN, ERR_INVALID_TOKEN};
use crate::errors::ApiError;
use crate::models::{Claims, TokenResponse, TokenType, User};

pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Signs and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_minutes: i64, refresh_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs: access_ttl_minutes * 60,
            refresh_ttl_secs: refresh_ttl_minutes * 60,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.access_token_expire_minutes,
            config.refresh_token_expire_minutes,
        )
    }

    /// Issue a fresh access/refresh pair for a user.
    pub fn issue_pair(&self, user: &User) -> Result<TokenResponse, ApiError> {
        Ok(TokenResponse {
            access_token: self.issue(user, TokenType::Access)?,
            refresh_token: self.issue(user, TokenType::Refresh)?,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }

    fn issue(&self, user: &User, token_type: TokenType) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_secs,
            TokenType::Refresh => self.refresh_ttl_secs,
        };

        // Refresh tokens carry only the subject.
        let (email, role) = match token_type {
            TokenType::Access => (Some(user.email.clone()), Some(user.role.to_string())),
            TokenType::Refresh => (None, None),
        };

        let claims = Claims {
            sub: user.id_hex(),
            email,
            role,
            token_type,
            jti: Uuid::new_v4().to_string(),
            exp: (now + ttl).max(0) as usize,
            iat: now as usize,
        };

        debug!(
            "Issuing {:?} token for user {} with role {}",
            token_type, claims.sub, user.role
        );

        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, ApiError> {
        Ok(encode(&Header::default(), claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry, and require the expected token type.
    pub fn decode(&self, token: &str, expected: TokenType) -> Result<Claims, ApiError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN)
            })?;

        if data.claims.token_type != expected {
            debug!(
                "Token type mismatch: expected {:?}, got {:?}",
                expected, data.claims.token_type
            );
            return Err(ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use mongodb::bson::oid::ObjectId;

    fn test_user() -> User {
        let now = mongodb::bson::DateTime::now();
        User {
            id: Some(ObjectId::new()),
            email: "prover@example.com".to_string(),
            username: "prover".to_string(),
            password_hash: "hash".to_string(),
            role: Role::ModelProvider,
            is_active: true,
            is_verified: false,
            api_key_hash: None,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }

    #[test]
    fn test_pair_round_trip() {
        let service = TokenService::new("test-secret", 60, 120);
        let user = test_user();
        let pair = service.issue_pair(&user).unwrap();
        assert_eq!(pair.token_type, "bearer");

        let access = service.decode(&pair.access_token, TokenType::Access).unwrap();
        assert_eq!(access.sub, user.id_hex());
        assert_eq!(access.role.as_deref(), Some("model_provider"));
        assert_eq!(access.email.as_deref(), Some("prover@example.com"));

        let refresh = service
            .decode(&pair.refresh_token, TokenType::Refresh)
            .unwrap();
        assert_eq!(refresh.sub, user.id_hex());
        assert!(refresh.email.is_none());
        assert!(refresh.exp > access.exp);
        assert_ne!(refresh.jti, access.jti);
    }

    #[test]
    fn test_token_type_is_enforced() {
        let service = TokenService::new("test-secret", 60, 120);
        let pair = service.issue_pair(&test_user()).unwrap();
        assert!(service.decode(&pair.refresh_token, TokenType::Access).is_err());
        assert!(service.decode(&pair.access_token, TokenType::Refresh).is_err());
    }

    #[test]
    fn test_different_secrets_reject() {
        let issuer = TokenService::new("secret1", 60, 120);
        let verifier = TokenService::new("secret2", 60, 120);
        let pair = issuer.issue_pair(&test_user()).unwrap();
        assert!(verifier.decode(&pair.access_token, TokenType::Access).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new("test-secret", 60, 120);
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: ObjectId::new().to_hex(),
            email: None,
            role: None,
            token_type: TokenType::Access,
            jti: Uuid::new_v4().to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = service.encode_claims(&claims).unwrap();
        assert!(service.decode(&token, TokenType::Access).is_err());
    }

    #[test]
    fn test_consecutive_pairs_differ() {
        let service = TokenService::new("test-secret", 60, 120);
        let user = test_user();
        let first = service.issue_pair(&user).unwrap();
        let second = service.issue_pair(&user).unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);
    }
}
