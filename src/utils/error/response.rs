//! HTTP response handling for errors

use super::types::GlowError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl GlowError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            GlowError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            GlowError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            GlowError::Auth(_) | GlowError::Jwt(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            GlowError::Session(_) => (StatusCode::UNAUTHORIZED, "SESSION_ERROR"),
            GlowError::Authorization(_) => (StatusCode::FORBIDDEN, "AUTHORIZATION_ERROR"),
            GlowError::Unconfirmed(_) => (StatusCode::FORBIDDEN, "EMAIL_NOT_CONFIRMED"),
            GlowError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            GlowError::BadRequest(_) | GlowError::Serialization(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            GlowError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            GlowError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            GlowError::Gone(_) => (StatusCode::GONE, "GONE"),
            GlowError::RateLimit(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for GlowError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.user_message().to_string(),
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
