//! Authentication middleware for protected API routes.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::debug;
use std::rc::Rc;

use crate::constants::{
    CODE_AUTH_REQUIRED, CODE_INVALID_TOKEN, ERR_AUTH_REQUIRED, ERR_INVALID_AUTH_HEADER,
};
use crate::errors::ApiError;
use crate::services::AuthService;

/// Authentication middleware.
///
/// Accepts either `Authorization: Bearer <access token>` or an API key in the
/// configured header. A bearer token wins when both are present. The resolved
/// [`AuthenticatedUser`](crate::models::AuthenticatedUser) is stored in the
/// request extensions. Rejections are rendered as [`ApiError`] responses.
pub struct AuthMiddleware {
    auth_service: web::Data<AuthService>,
    api_key_header: Rc<str>,
}

impl AuthMiddleware {
    pub fn new(auth_service: web::Data<AuthService>, api_key_header: &str) -> Self {
        Self {
            auth_service,
            api_key_header: Rc::from(api_key_header),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
            auth_service: self.auth_service.clone(),
            api_key_header: Rc::clone(&self.api_key_header),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    auth_service: web::Data<AuthService>,
    api_key_header: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let auth_service = self.auth_service.clone();

        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        let api_key = req
            .headers()
            .get(&*self.api_key_header)
            .and_then(|h| h.to_str().ok())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Box::pin(async move {
            let bearer = auth_header
                .as_deref()
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty());

            let resolved = match (bearer, api_key) {
                (Some(token), _) => auth_service.authenticate_bearer(token).await,
                (None, Some(key)) => auth_service.authenticate_api_key(&key).await,
                (None, None) if auth_header.is_some() => Err(ApiError::unauthorized(
                    CODE_INVALID_TOKEN,
                    ERR_INVALID_AUTH_HEADER,
                )),
                (None, None) => Err(ApiError::unauthorized(
                    CODE_AUTH_REQUIRED,
                    ERR_AUTH_REQUIRED,
                )),
            };

            let identity = match resolved {
                Ok(identity) => identity,
                Err(e) => {
                    debug!("Rejected {}: {}", req.path(), e);
                    return Ok(req.error_response(e).map_into_right_body());
                }
            };

            debug!(
                "Authenticated user {} for {}",
                identity.user.id_hex(),
                req.path()
            );
            req.extensions_mut().insert(identity);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
