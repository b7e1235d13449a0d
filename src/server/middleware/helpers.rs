//! Helper functions for request authentication

use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Bearer token of the `Authorization` header, if any
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
