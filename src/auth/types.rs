//! Authentication types shared by the identity backend and the session provider

use crate::utils::error::GlowError;
use crate::utils::messages::Notice;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Where a successful sign-in lands when no location was captured
pub const DEFAULT_LANDING: &str = "/";
/// Where unauthenticated visitors are sent
pub const LOGIN_ROUTE: &str = "/login";

/// An authenticated identity with its tokens
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Bearer token for API calls
    pub access_token: String,
    /// Only issued to "remember me" sessions
    pub refresh_token: Option<String>,
    pub remember_me: bool,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .field("remember_me", &self.remember_me)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Authentication state as seen by the guards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The stored session has not been checked yet
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Result of a session provider operation
///
/// Failures carry a short localized message, never an internal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Location the client should move to next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl AuthOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            redirect_to: None,
        }
    }

    pub fn redirect<S: Into<String>>(to: S) -> Self {
        Self {
            redirect_to: Some(to.into()),
            ..Self::ok()
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            success: false,
            error: Some(notice.to_string()),
            redirect_to: None,
        }
    }

    pub fn failed(error: &GlowError) -> Self {
        Self::notice(error.user_message())
    }
}

/// What happened to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

/// Account fields a held session mirrors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub email: String,
    pub display_name: String,
}

/// Auth-state change published by the identity backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub user_id: Uuid,
    /// Session the event is about, when it concerns one session
    pub session_id: Option<Uuid>,
    /// New session state for `SignedIn`, `TokenRefreshed` and `PasswordRecovery`
    pub session: Option<Session>,
    /// Current account fields for `UserUpdated`
    pub profile: Option<AccountProfile>,
}

impl AuthEvent {
    pub fn with_session(kind: AuthEventKind, session: &Session) -> Self {
        Self {
            kind,
            user_id: session.user_id,
            session_id: Some(session.session_id),
            session: Some(session.clone()),
            profile: None,
        }
    }

    pub fn signed_out(user_id: Uuid, session_id: Uuid) -> Self {
        Self {
            kind: AuthEventKind::SignedOut,
            user_id,
            session_id: Some(session_id),
            session: None,
            profile: None,
        }
    }

    pub fn user_updated(user_id: Uuid, email: &str, display_name: &str) -> Self {
        Self {
            kind: AuthEventKind::UserUpdated,
            user_id,
            session_id: None,
            session: None,
            profile: Some(AccountProfile {
                email: email.to_string(),
                display_name: display_name.to_string(),
            }),
        }
    }
}

/// A newly registered identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub user_id: Uuid,
    pub email: String,
    /// Whether sign-in waits for the verification link
    pub confirmation_required: bool,
}
