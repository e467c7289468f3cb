//! Health check handlers.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::warn;
use std::time::Instant;

use crate::constants::MSG_SERVER_RUNNING;
use crate::models::{DatabaseHealth, DetailedHealthResponse, HealthResponse};
use crate::services::AuthService;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: MSG_SERVER_RUNNING.to_string(),
    })
}

/// Readiness probe including a user store round trip
#[utoipa::path(
    get,
    path = "/api/v1/health/detailed",
    tag = "Health",
    responses(
        (status = 200, description = "Health report", body = DetailedHealthResponse)
    )
)]
pub async fn detailed_health(auth_service: web::Data<AuthService>) -> HttpResponse {
    let started = Instant::now();

    let db_started = Instant::now();
    let database = match auth_service.ping_store().await {
        Ok(()) => DatabaseHealth {
            status: "healthy".to_string(),
            latency_ms: Some(round2(db_started.elapsed().as_secs_f64() * 1000.0)),
        },
        Err(e) => {
            warn!("Health check: user store unreachable: {}", e);
            DatabaseHealth {
                status: format!("unhealthy: {}", e),
                latency_ms: None,
            }
        }
    };

    let status = if database.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(DetailedHealthResponse {
        status: status.to_string(),
        timestamp: Utc::now().timestamp(),
        response_time_ms: round2(started.elapsed().as_secs_f64() * 1000.0),
        database,
    })
}
