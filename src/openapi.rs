use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::config::CONFIG;
use crate::models::{
    ApiKeyResponse, DatabaseHealth, DetailedHealthResponse, ErrorResponse, HealthResponse,
    LoginRequest, LogoutRequest, LogoutResponse, RefreshRequest, RegisterRequest, Role,
    TokenResponse, UserResponse,
};

/// OpenAPI documentation for the VeraNode API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VeraNode API",
        version = "0.1.0",
        description = "Authentication and session API for the VeraNode model verification platform."
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "Registration, login, token refresh, logout and API keys")
    ),
    paths(
        crate::handlers::register,
        crate::handlers::login,
        crate::handlers::refresh,
        crate::handlers::me,
        crate::handlers::logout,
        crate::handlers::generate_api_key,
        crate::handlers::health_check,
        crate::handlers::detailed_health
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            LogoutRequest,
            Role,
            UserResponse,
            TokenResponse,
            ApiKeyResponse,
            LogoutResponse,
            ErrorResponse,
            HealthResponse,
            DetailedHealthResponse,
            DatabaseHealth
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Bearer token and API key security schemes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Access token obtained from the /api/v1/auth/login endpoint",
                        ))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    CONFIG.api_key_header.as_str(),
                ))),
            );
        }
    }
}
