//! JWT module tests

#[cfg(test)]
mod tests {
    use crate::auth::jwt::{AccessGrant, JwtHandler};
    use crate::config::AuthConfig;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn create_test_handler() -> JwtHandler {
        let config = AuthConfig {
            jwt_secret: "test_secret_key_for_testing_only_0123456789".to_string(),
            ..AuthConfig::default()
        };
        JwtHandler::new(&config)
    }

    #[test]
    fn test_create_and_verify_access_token() {
        let handler = create_test_handler();
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let now = Utc::now();

        let token = handler
            .create_access_token(AccessGrant {
                user_id,
                session_id,
                email: "ana@example.com",
                display_name: "Ana",
                issued_at: now,
                expires_at: now + Duration::hours(1),
            })
            .unwrap();

        let claims = handler.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.sid, session_id);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.aud, "dashboard");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let handler = create_test_handler();
        let now = Utc::now();

        let token = handler
            .create_access_token(AccessGrant {
                user_id: Uuid::new_v4(),
                session_id: Uuid::new_v4(),
                email: "ana@example.com",
                display_name: "Ana",
                issued_at: now - Duration::hours(2),
                expires_at: now - Duration::hours(1),
            })
            .unwrap();

        assert!(handler.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let handler = create_test_handler();
        let other = JwtHandler::new(&AuthConfig {
            jwt_secret: "another_secret_key_for_testing_only_987654".to_string(),
            ..AuthConfig::default()
        });
        let now = Utc::now();

        let token = other
            .create_access_token(AccessGrant {
                user_id: Uuid::new_v4(),
                session_id: Uuid::new_v4(),
                email: "ana@example.com",
                display_name: "Ana",
                issued_at: now,
                expires_at: now + Duration::hours(1),
            })
            .unwrap();

        assert!(handler.verify_token(&token).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(
            JwtHandler::extract_token_from_header("Bearer abc.def"),
            Some("abc.def")
        );
        assert_eq!(JwtHandler::extract_token_from_header("Basic abc"), None);
        assert_eq!(JwtHandler::extract_token_from_header("Bearer "), None);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let handler = create_test_handler();
        let debug = format!("{:?}", handler);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test_secret_key"));
    }
}
