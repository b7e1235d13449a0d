//! Error types for GlowDesk

use thiserror::Error;

/// Result type alias for GlowDesk
pub type Result<T> = std::result::Result<T, GlowError>;

/// Main error type for GlowDesk
#[derive(Error, Debug)]
pub enum GlowError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors (bad credentials, expired or unknown session)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Correct credentials, but the e-mail address was never confirmed
    #[error("Email not confirmed: {0}")]
    Unconfirmed(String),

    /// Authorization errors (missing role or resource permission)
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The resource existed but is no longer usable (expired or consumed tokens)
    #[error("Gone: {0}")]
    Gone(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Too many failed attempts
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Session errors
    #[error("Session error: {0}")]
    Session(String),

    /// Outbound e-mail errors
    #[error("Email error: {0}")]
    Email(String),
}
