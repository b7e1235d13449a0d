//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::StorageHealthStatus;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    pub version: Cow<'static, str>,
    pub salon: String,
    pub storage: StorageHealthStatus,
}

/// 200 while the database answers, 503 otherwise
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let storage = state.storage.health_check().await;
    let healthy = storage.overall;
    let health = HealthStatus {
        status: Cow::Borrowed(if healthy { "healthy" } else { "unhealthy" }),
        timestamp: Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        salon: state.config.salon.name.clone(),
        storage,
    };

    let mut response = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    Ok(response.json(ApiResponse::success(health)))
}
