//! Tests for configuration validation

#[cfg(test)]
mod tests {
    use super::super::trait_def::Validate;
    use crate::config::models::*;

    #[test]
    fn test_server_config_validation() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.port = 0;
        assert!(config.validate().is_err());

        config.port = 8080;
        config.host = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_wildcard_with_credentials_is_rejected() {
        let config = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_url_scheme() {
        let mut config = DatabaseConfig::default();
        assert!(config.validate().is_ok());

        config.url = "mysql://localhost/glowdesk".to_string();
        assert!(config.validate().is_err());

        config.url = "postgres://localhost/glowdesk".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_secret_validation() {
        let mut config = AuthConfig::default();
        assert!(config.validate().is_ok());

        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());

        config.jwt_secret = "abcdefghijklmnopqrstuvwxyzabcdefgh".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_remember_me_must_outlast_session() {
        let config = AuthConfig {
            session_expiration: 86400,
            remember_me_expiration: 3600,
            ..AuthConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("Remember-me"));
    }

    #[test]
    fn test_salon_grid_validation() {
        let mut config = SalonConfig::default();
        assert!(config.validate().is_ok());

        config.slot_minutes = 25;
        assert!(config.validate().is_err());

        config.slot_minutes = 30;
        config.opening_hour = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rbac_bootstrap_admins_must_be_emails() {
        let config = RbacConfig {
            bootstrap_admins: vec!["owner".to_string()],
            ..RbacConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
