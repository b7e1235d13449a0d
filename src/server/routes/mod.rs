//! HTTP route modules
//!
//! Every handler answers with an [`ApiResponse`] envelope on success; failures
//! go through the `ResponseError` mapping of the crate error type.

pub mod auth;
pub mod health;
pub mod navigation;
pub mod public;
pub mod records;
pub mod roles;

use actix_web::web;
use serde::Serialize;

/// Standard API response structure
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
        }
    }

    /// Create a successful response with metadata
    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without a body
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            meta: None,
        }
    }
}

/// Register every route of the API
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(public::configure_routes)
        .service(
            web::scope("/api")
                .configure(roles::configure_routes)
                .configure(navigation::configure_routes)
                .configure(records::configure_routes),
        );
}
