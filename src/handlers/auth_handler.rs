//! Authentication handlers: register, login, refresh, me, logout, API keys.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::constants::{MSG_API_KEY_CREATED, MSG_LOGOUT_DETAIL, MSG_LOGOUT_SUCCESS};
use crate::errors::ApiError;
use crate::middleware::require_auth;
use crate::models::{
    ApiKeyResponse, LoginRequest, LogoutRequest, LogoutResponse, RefreshRequest, RegisterRequest,
    UserResponse,
};
use crate::services::AuthService;
use crate::validators::validation_errors_to_api_error;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error, or email/username taken", body = crate::models::ErrorResponse),
        (status = 403, description = "Role cannot be self-assigned", body = crate::models::ErrorResponse)
    )
)]
pub async fn register(
    auth_service: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let user = auth_service.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate with email and password and receive a token pair
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = crate::models::TokenResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Incorrect email or password", body = crate::models::ErrorResponse),
        (status = 403, description = "Account is inactive", body = crate::models::ErrorResponse)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let tokens = auth_service.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// Exchange a refresh token for a new token pair
///
/// The presented refresh token is revoked; reusing it fails with 401.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token pair rotated", body = crate::models::TokenResponse),
        (status = 401, description = "Invalid, expired or revoked refresh token", body = crate::models::ErrorResponse)
    )
)]
pub async fn refresh(
    auth_service: web::Data<AuthService>,
    body: web::Json<RefreshRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let tokens = auth_service.refresh(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = crate::models::ErrorResponse),
        (status = 403, description = "Inactive user", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = []),
        ("api_key" = [])
    )
)]
pub async fn me(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let identity = require_auth(&req)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(identity.user)))
}

/// Logout the current user
///
/// Revokes the presented access token until it expires. A refresh token in
/// the body is revoked as well.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse),
        (status = 401, description = "Invalid or missing token", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
    body: Option<web::Json<LogoutRequest>>,
) -> Result<HttpResponse, ApiError> {
    let identity = require_auth(&req)?;
    let refresh_token = body.and_then(|b| b.into_inner().refresh_token);

    auth_service
        .logout(&identity, refresh_token.as_deref())
        .await;

    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: MSG_LOGOUT_SUCCESS.to_string(),
        detail: MSG_LOGOUT_DETAIL.to_string(),
    }))
}

/// Generate a new API key for the current user
///
/// Replaces any previous key. The key is shown only in this response.
#[utoipa::path(
    post,
    path = "/api/v1/auth/api-key",
    tag = "Authentication",
    responses(
        (status = 200, description = "API key created", body = ApiKeyResponse),
        (status = 401, description = "Not authenticated", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = []),
        ("api_key" = [])
    )
)]
pub async fn generate_api_key(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, ApiError> {
    let identity = require_auth(&req)?;
    let api_key = auth_service.generate_api_key(&identity.user).await?;

    Ok(HttpResponse::Ok().json(ApiKeyResponse {
        api_key,
        message: MSG_API_KEY_CREATED.to_string(),
    }))
}
