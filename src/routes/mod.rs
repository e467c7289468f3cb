use actix_governor::Governor;
use actix_web::middleware::Condition;
use actix_web::web;

use crate::config::Config;
use crate::constants::CODE_VALIDATION_FAILED;
use crate::errors::ApiError;
use crate::handlers;
use crate::middleware::{create_auth_rate_limiter_config, AuthMiddleware, AuthRateLimiterConfig};
use crate::services::AuthService;

/// Route-level settings shared by every worker.
#[derive(Clone)]
pub struct RouteSettings {
    pub api_prefix: String,
    pub api_key_header: String,
    pub rate_limit: bool,
    pub rate_limiter: AuthRateLimiterConfig,
}

impl RouteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_prefix: config.api_prefix.clone(),
            api_key_header: config.api_key_header.clone(),
            rate_limit: config.auth_rate_limit,
            rate_limiter: create_auth_rate_limiter_config(),
        }
    }
}

pub fn configure_routes(
    cfg: &mut web::ServiceConfig,
    auth_service: web::Data<AuthService>,
    settings: &RouteSettings,
) {
    // Malformed JSON bodies get the same error shape as everything else
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(CODE_VALIDATION_FAILED, &err.to_string()).into()
    });

    let limited = || Condition::new(settings.rate_limit, Governor::new(&settings.rate_limiter));
    let authenticated = || AuthMiddleware::new(auth_service.clone(), &settings.api_key_header);

    cfg.app_data(auth_service.clone())
        .app_data(json_config)
        .service(
            web::scope(&settings.api_prefix)
                // Health checks
                .route("/health", web::get().to(handlers::health_check))
                .route("/health/detailed", web::get().to(handlers::detailed_health))
                .route("/openapi.json", web::get().to(handlers::openapi_json))
                .service(
                    web::scope("/auth")
                        // Public, rate limited
                        .service(
                            web::resource("/register")
                                .wrap(limited())
                                .route(web::post().to(handlers::register)),
                        )
                        .service(
                            web::resource("/login")
                                .wrap(limited())
                                .route(web::post().to(handlers::login)),
                        )
                        .service(
                            web::resource("/refresh")
                                .wrap(limited())
                                .route(web::post().to(handlers::refresh)),
                        )
                        // Bearer token or API key
                        .service(
                            web::resource("/me")
                                .wrap(authenticated())
                                .route(web::get().to(handlers::me)),
                        )
                        .service(
                            web::resource("/logout")
                                .wrap(authenticated())
                                .route(web::post().to(handlers::logout)),
                        )
                        .service(
                            web::resource("/api-key")
                                .wrap(authenticated())
                                .route(web::post().to(handlers::generate_api_key)),
                        ),
                ),
        )
        // Page routes, behind the RouteGuard
        .default_service(web::to(handlers::page_shell));
}
