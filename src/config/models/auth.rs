//! Authentication and access-control configuration

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT issuer
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Lifetime of a regular session in seconds
    #[serde(default = "default_session_expiration")]
    pub session_expiration: u64,
    /// Lifetime of a "remember me" session in seconds
    #[serde(default = "default_remember_me_expiration")]
    pub remember_me_expiration: u64,
    /// Lifetime of a password recovery link in seconds
    #[serde(default = "default_recovery_token_ttl")]
    pub recovery_token_ttl: u64,
    /// Lifetime of an e-mail verification link in seconds
    #[serde(default = "default_email_verification_ttl")]
    pub email_verification_ttl: u64,
    /// Refuse sign-in until the address has been confirmed
    #[serde(default)]
    pub require_email_confirmation: bool,
    /// Minimum password length
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Failed sign-in attempts before a temporary lockout
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,
    /// Lockout duration in seconds
    #[serde(default = "default_lockout_duration")]
    pub lockout_duration: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            issuer: default_issuer(),
            session_expiration: default_session_expiration(),
            remember_me_expiration: default_remember_me_expiration(),
            recovery_token_ttl: default_recovery_token_ttl(),
            email_verification_ttl: default_email_verification_ttl(),
            require_email_confirmation: false,
            min_password_length: default_min_password_length(),
            max_failed_attempts: default_max_failed_attempts(),
            lockout_duration: default_lockout_duration(),
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.jwt_secret.is_empty() && other.jwt_secret != "change-me" {
            self.jwt_secret = other.jwt_secret;
        }
        if other.issuer != default_issuer() {
            self.issuer = other.issuer;
        }
        if other.session_expiration != default_session_expiration() {
            self.session_expiration = other.session_expiration;
        }
        if other.remember_me_expiration != default_remember_me_expiration() {
            self.remember_me_expiration = other.remember_me_expiration;
        }
        if other.recovery_token_ttl != default_recovery_token_ttl() {
            self.recovery_token_ttl = other.recovery_token_ttl;
        }
        if other.email_verification_ttl != default_email_verification_ttl() {
            self.email_verification_ttl = other.email_verification_ttl;
        }
        if other.require_email_confirmation {
            self.require_email_confirmation = true;
        }
        if other.min_password_length != default_min_password_length() {
            self.min_password_length = other.min_password_length;
        }
        if other.max_failed_attempts != default_max_failed_attempts() {
            self.max_failed_attempts = other.max_failed_attempts;
        }
        if other.lockout_duration != default_lockout_duration() {
            self.lockout_duration = other.lockout_duration;
        }
        self
    }

    /// Session lifetime for the given "remember me" choice
    pub fn session_lifetime(&self, remember_me: bool) -> chrono::Duration {
        let secs = if remember_me {
            self.remember_me_expiration
        } else {
            self.session_expiration
        };
        chrono::Duration::seconds(secs as i64)
    }
}

/// Role-based access control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// How long resolved roles are cached per user, 0 disables the cache
    #[serde(default = "default_rbac_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Maximum number of cached users
    #[serde(default = "default_rbac_cache_capacity")]
    pub cache_capacity: u64,
    /// E-mail addresses that receive the admin role when they sign up
    #[serde(default)]
    pub bootstrap_admins: Vec<String>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_rbac_cache_ttl(),
            cache_capacity: default_rbac_cache_capacity(),
            bootstrap_admins: vec![],
        }
    }
}

impl RbacConfig {
    /// Merge RBAC configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.cache_ttl_secs != default_rbac_cache_ttl() {
            self.cache_ttl_secs = other.cache_ttl_secs;
        }
        if other.cache_capacity != default_rbac_cache_capacity() {
            self.cache_capacity = other.cache_capacity;
        }
        if !other.bootstrap_admins.is_empty() {
            self.bootstrap_admins = other.bootstrap_admins;
        }
        self
    }

    /// Whether this address is granted the admin role on sign-up
    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.bootstrap_admins
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }
}

fn default_issuer() -> String {
    "glowdesk".to_string()
}

fn default_session_expiration() -> u64 {
    8 * 3600
}

fn default_remember_me_expiration() -> u64 {
    30 * 86400
}

fn default_recovery_token_ttl() -> u64 {
    3600
}

fn default_email_verification_ttl() -> u64 {
    86400
}

fn default_min_password_length() -> usize {
    8
}

fn default_max_failed_attempts() -> u32 {
    5
}

fn default_lockout_duration() -> u64 {
    900
}

fn default_rbac_cache_ttl() -> u64 {
    30
}

fn default_rbac_cache_capacity() -> u64 {
    1000
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secret_is_long_enough() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt_secret.len(), 64);
        assert_ne!(config.jwt_secret, AuthConfig::default().jwt_secret);
    }

    #[test]
    fn test_session_lifetime_follows_remember_me() {
        let config = AuthConfig::default();
        assert_eq!(config.session_lifetime(false), chrono::Duration::hours(8));
        assert_eq!(config.session_lifetime(true), chrono::Duration::days(30));
    }

    #[test]
    fn test_bootstrap_admin_is_case_insensitive() {
        let rbac = RbacConfig {
            bootstrap_admins: vec!["Owner@Salon.example".to_string()],
            ..RbacConfig::default()
        };
        assert!(rbac.is_bootstrap_admin("owner@salon.example"));
        assert!(!rbac.is_bootstrap_admin("staff@salon.example"));
    }
}
