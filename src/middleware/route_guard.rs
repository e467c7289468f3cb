//! Cookie-based route guard for page routes.
//!
//! Visitors without an `accessToken` cookie are bounced from protected
//! routes to the login page, carrying the requested path in `redirect`.
//! Visitors with one are bounced from the auth pages to the dashboard.
//! The cookie is only checked for presence; API calls validate the token.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::debug;

use crate::constants::{
    ACCESS_TOKEN_KEY, AUTH_ROUTES, HOME_ROUTE, LOGIN_ROUTE, PROTECTED_ROUTES, REDIRECT_PARAM,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// `route` matches itself and anything below it.
fn matches_route(path: &str, route: &str) -> bool {
    match path.strip_prefix(route) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn is_protected(path: &str) -> bool {
    PROTECTED_ROUTES.iter().any(|route| matches_route(path, route))
}

pub fn is_auth_route(path: &str) -> bool {
    AUTH_ROUTES.iter().any(|route| matches_route(path, route))
}

/// Login location remembering where the visitor was headed.
pub fn login_redirect(path: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_PARAM, path)
        .finish();
    format!("{}?{}", LOGIN_ROUTE, query)
}

pub fn guard_decision(path: &str, authenticated: bool) -> RouteDecision {
    if !authenticated && is_protected(path) {
        RouteDecision::Redirect(login_redirect(path))
    } else if authenticated && is_auth_route(path) {
        RouteDecision::Redirect(HOME_ROUTE.to_string())
    } else {
        RouteDecision::Allow
    }
}

pub struct RouteGuard;

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RouteGuardService { service })
    }
}

pub struct RouteGuardService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
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
        let authenticated = req
            .cookie(ACCESS_TOKEN_KEY)
            .map(|c| !c.value().is_empty())
            .unwrap_or(false);

        match guard_decision(req.path(), authenticated) {
            RouteDecision::Allow => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            RouteDecision::Redirect(location) => {
                debug!("Route guard: {} -> {}", req.path(), location);
                let response = HttpResponse::TemporaryRedirect()
                    .insert_header((header::LOCATION, location))
                    .finish()
                    .map_into_right_body();
                Box::pin(async move { Ok(req.into_response(response)) })
            }
        }
    }
}
