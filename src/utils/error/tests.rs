//! Tests for error handling

#[cfg(test)]
mod tests {
    use super::super::types::GlowError;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_creation() {
        let error = GlowError::auth("Invalid token");
        assert!(matches!(error, GlowError::Auth(_)));

        let error = GlowError::bad_request("Missing parameter");
        assert!(matches!(error, GlowError::BadRequest(_)));
    }

    #[test]
    fn test_gone_helper() {
        let error = GlowError::gone("token used");
        assert!(matches!(error, GlowError::Gone(msg) if msg == "token used"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GlowError::auth("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GlowError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(GlowError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(GlowError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(GlowError::gone("x").status_code(), StatusCode::GONE);
        assert_eq!(
            GlowError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_failure_classification() {
        assert!(GlowError::internal("boom").is_backend_failure());
        assert!(!GlowError::validation("bad email").is_backend_failure());
    }

    #[test]
    fn test_error_display() {
        let error = GlowError::validation("email is required");
        assert_eq!(error.to_string(), "Validation error: email is required");
    }
}
