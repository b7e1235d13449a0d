//! User-facing notices
//!
//! Every failure that reaches an end user is turned into one of these short,
//! actionable messages. Internal error details stay in the logs.

use serde::Serialize;
use std::fmt;

/// A short message shown inline on a form or as a transient toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Notice {
    InvalidCredentials,
    EmailNotConfirmed,
    EmailAlreadyRegistered,
    WeakPassword,
    SessionExpired,
    AccessDenied,
    InvalidInput(String),
    NotFound,
    Conflict(String),
    LinkExpired,
    TooManyAttempts,
    LoadFailed,
    SaveFailed,
    DeleteFailed,
    Saved,
    Deleted,
    Unexpected,
}

impl Notice {
    /// Whether the notice reports a failure
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved | Notice::Deleted)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidCredentials => f.write_str("Wrong e-mail or password"),
            Notice::EmailNotConfirmed => {
                f.write_str("Please confirm your e-mail address before signing in")
            }
            Notice::EmailAlreadyRegistered => {
                f.write_str("An account with this e-mail already exists")
            }
            Notice::WeakPassword => f.write_str("The password must be at least 8 characters"),
            Notice::SessionExpired => f.write_str("Your session has expired, please sign in again"),
            Notice::AccessDenied => f.write_str("You do not have access to this page"),
            Notice::InvalidInput(detail) => write!(f, "Please check the form: {}", detail),
            Notice::NotFound => f.write_str("This item no longer exists"),
            Notice::Conflict(detail) => write!(f, "This cannot be done: {}", detail),
            Notice::LinkExpired => f.write_str("This link has expired or was already used"),
            Notice::TooManyAttempts => {
                f.write_str("Too many attempts, please wait a moment and try again")
            }
            Notice::LoadFailed => {
                f.write_str("An error occurred while loading data, please try again")
            }
            Notice::SaveFailed => f.write_str("An error occurred while saving, please try again"),
            Notice::DeleteFailed => {
                f.write_str("An error occurred while deleting, please try again")
            }
            Notice::Saved => f.write_str("Saved"),
            Notice::Deleted => f.write_str("Deleted"),
            Notice::Unexpected => f.write_str("Something went wrong, please try again"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GlowError;

    #[test]
    fn test_auth_error_maps_to_credentials_notice() {
        let notice = GlowError::auth("bad password for a@b.c").user_message();
        assert_eq!(notice, Notice::InvalidCredentials);
        assert_eq!(notice.to_string(), "Wrong e-mail or password");
    }

    #[test]
    fn test_backend_errors_do_not_leak_details() {
        let notice = GlowError::internal("connection reset by peer").user_message();
        assert!(!notice.to_string().contains("connection"));
    }

    #[test]
    fn test_success_notices_are_not_errors() {
        assert!(!Notice::Saved.is_error());
        assert!(Notice::LoadFailed.is_error());
    }
}
