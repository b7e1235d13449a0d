//! Configuration management
//!
//! Configuration is read from a YAML file, then selected values may be
//! overridden through `GLOWDESK_*` environment variables (a `.env` file is
//! honoured) and finally by command-line flags.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GlowError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rbac: RbacConfig,
    #[serde(default)]
    pub salon: SalonConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GlowError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| GlowError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from defaults and environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `GLOWDESK_*` environment variables on top of this configuration
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(host) = env_var("GLOWDESK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env::<u16>("GLOWDESK_PORT")? {
            self.server.port = port;
        }
        if let Some(url) = env_var("GLOWDESK_PUBLIC_URL") {
            self.server.public_url = url;
        }
        if let Some(url) = env_var("GLOWDESK_DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Some(secret) = env_var("GLOWDESK_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(admins) = env_var("GLOWDESK_BOOTSTRAP_ADMINS") {
            self.rbac.bootstrap_admins = admins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(seed) = parse_env::<bool>("GLOWDESK_SEED_DEMO")? {
            self.demo.seed_on_empty = seed;
        }
        if let Some(level) = env_var("GLOWDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = parse_env::<bool>("GLOWDESK_LOG_JSON")? {
            self.logging.json = json;
        }
        Ok(self)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        section("Server", &self.server)?;
        section("Storage", &self.storage)?;
        section("Auth", &self.auth)?;
        section("RBAC", &self.rbac)?;
        section("Salon", &self.salon)?;
        section("Logging", &self.logging)?;

        self.server.cors.warn_if_permissive();

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.auth = self.auth.merge(other.auth);
        self.rbac = self.rbac.merge(other.rbac);
        self.salon = self.salon.merge(other.salon);
        self.demo = self.demo.merge(other.demo);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GlowError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn section<V: Validate>(name: &str, value: &V) -> Result<()> {
    value
        .validate()
        .map_err(|e| GlowError::Config(format!("{} config error: {}", name, e)))
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| GlowError::Config(format!("Invalid value for {}: {}", key, raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 9090

storage:
  database:
    url: "sqlite::memory:"
    max_connections: 1

auth:
  jwt_secret: "Test-Secret-That-Is-At-Least-32-Characters-Long"
  require_email_confirmation: true

rbac:
  cache_ttl_secs: 0
  bootstrap_admins: ["owner@salon.example"]

salon:
  late_cancellation_hours: 12
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.database.max_connections, 1);
        assert!(config.auth.require_email_confirmation);
        assert_eq!(config.rbac.cache_ttl_secs, 0);
        assert_eq!(config.salon.late_cancellation_hours, 12);
        assert_eq!(config.salon.opening_hour, 9);
        assert!(config.demo.seed_on_empty);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = Config::from_yaml("server: [not, a, map]").unwrap_err();
        assert!(matches!(err, GlowError::Config(_)));
    }

    #[test]
    fn test_validation_error_names_section() {
        let err = Config::from_yaml("salon:\n  slot_minutes: 7\n").unwrap_err();
        assert!(err.to_string().contains("Salon config error"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut other = Config::default();
        other.server.port = 7000;
        other.demo.seed_on_empty = false;

        let merged = Config::default().merge(other);
        assert_eq!(merged.server.port, 7000);
        assert!(!merged.demo.seed_on_empty);
    }

    #[test]
    fn test_config_serialization() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("late_cancellation_hours"));
    }
}
