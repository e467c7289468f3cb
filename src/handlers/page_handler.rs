//! Page routes and the OpenAPI document.
//!
//! Page routes sit behind the [`RouteGuard`](crate::middleware::RouteGuard);
//! by the time a request lands here it is allowed to see the page.

use actix_web::{HttpRequest, HttpResponse};
use utoipa::OpenApi;

use crate::constants::{CODE_NOT_FOUND, ERR_PAGE_NOT_FOUND, PUBLIC_ROUTES};
use crate::errors::ApiError;
use crate::middleware::route_guard::is_protected;
use crate::openapi::ApiDoc;

const PAGE_SHELL: &str = "<!doctype html><html><head><meta charset=\"utf-8\">\
<title>VeraNode</title></head><body><div id=\"root\"></div></body></html>";

fn is_known_page(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path) || is_protected(path)
}

/// Minimal HTML shell for a page route; the frontend bundle takes over from here.
pub async fn page_shell(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if !is_known_page(req.path()) {
        return Err(ApiError::not_found(CODE_NOT_FOUND, ERR_PAGE_NOT_FOUND));
    }

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(PAGE_SHELL))
}

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
