//! Validators for every configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

const WEAK_SECRETS: &[&str] = &["change-me", "your-secret-key", "change-me-in-production"];

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if !self.public_url.starts_with("http://") && !self.public_url.starts_with("https://") {
            return Err("Public URL must start with http:// or https://".to_string());
        }

        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.allows_all_origins() && self.allow_credentials {
            return Err(
                "CORS cannot allow all origins (*) when credentials are enabled".to_string(),
            );
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        self.database.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating database configuration");

        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if !self.url.starts_with("sqlite:") && !self.url.starts_with("postgres") {
            return Err("Database URL must be a sqlite: or postgres:// URL".to_string());
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating auth configuration");

        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }

        if WEAK_SECRETS.contains(&self.jwt_secret.as_str())
            || self.jwt_secret.chars().all(|c| c.is_ascii_lowercase())
        {
            return Err("JWT secret must not use a default or trivially weak value".to_string());
        }

        if self.session_expiration < 300 {
            return Err("Session expiration should be at least 5 minutes".to_string());
        }

        if self.remember_me_expiration < self.session_expiration {
            return Err(
                "Remember-me expiration cannot be shorter than the regular session".to_string(),
            );
        }

        if self.remember_me_expiration > 86400 * 90 {
            return Err("Remember-me expiration should not exceed 90 days".to_string());
        }

        if self.recovery_token_ttl == 0 || self.email_verification_ttl == 0 {
            return Err("Link lifetimes must be greater than 0".to_string());
        }

        if self.min_password_length < 6 {
            return Err("Minimum password length must be at least 6".to_string());
        }

        if self.max_failed_attempts == 0 {
            return Err("Max failed attempts must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RbacConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cache_ttl_secs > 3600 {
            return Err("Role cache TTL should not exceed one hour".to_string());
        }

        if self.bootstrap_admins.iter().any(|email| !email.contains('@')) {
            return Err("Bootstrap admins must be e-mail addresses".to_string());
        }

        Ok(())
    }
}

impl Validate for SalonConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating salon configuration");

        if self.opening_hour >= self.closing_hour || self.closing_hour > 24 {
            return Err("Opening hour must be before closing hour within one day".to_string());
        }

        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err("Slot length must divide an hour evenly".to_string());
        }

        if self.default_duration_minutes == 0 {
            return Err("Default appointment duration must be greater than 0".to_string());
        }

        if self.late_cancellation_hours > 24 * 7 {
            return Err("Late cancellation threshold should not exceed one week".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
