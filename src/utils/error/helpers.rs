//! Helper functions for creating specific error types

use super::types::GlowError;
use crate::utils::messages::Notice;

/// Helper functions for creating specific errors
impl GlowError {
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn authorization<S: Into<String>>(message: S) -> Self {
        Self::Authorization(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn gone<S: Into<String>>(message: S) -> Self {
        Self::Gone(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::RateLimit(message.into())
    }

    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session(message.into())
    }

    /// Whether this error came from the storage layer rather than the caller
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            GlowError::Database(_)
                | GlowError::Io(_)
                | GlowError::Internal(_)
                | GlowError::Crypto(_)
                | GlowError::Email(_)
        )
    }

    /// Short localized message safe to show to an end user
    pub fn user_message(&self) -> Notice {
        match self {
            GlowError::Auth(_) | GlowError::Jwt(_) => Notice::InvalidCredentials,
            GlowError::Session(_) => Notice::SessionExpired,
            GlowError::Authorization(_) => Notice::AccessDenied,
            GlowError::Unconfirmed(_) => Notice::EmailNotConfirmed,
            GlowError::Validation(msg) | GlowError::BadRequest(msg) => {
                Notice::InvalidInput(msg.clone())
            }
            GlowError::NotFound(_) => Notice::NotFound,
            GlowError::Conflict(msg) => Notice::Conflict(msg.clone()),
            GlowError::Gone(_) => Notice::LinkExpired,
            GlowError::RateLimit(_) => Notice::TooManyAttempts,
            _ => Notice::Unexpected,
        }
    }
}
