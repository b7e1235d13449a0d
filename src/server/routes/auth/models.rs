//! Request and response bodies of the authentication endpoints

use crate::auth::Session;
use crate::auth::rbac::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    /// Long-lived session with a refresh token
    #[serde(default, alias = "rememberMe")]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Single-use link token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// The signed-in user as the dashboard header shows it
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub expires_at: DateTime<Utc>,
    pub remember_me: bool,
    pub roles: Vec<Role>,
}

impl SessionInfo {
    pub fn new(session: &Session, roles: Vec<Role>) -> Self {
        Self {
            user_id: session.user_id,
            email: session.email.clone(),
            display_name: session.display_name.clone(),
            expires_at: session.expires_at,
            remember_me: session.remember_me,
            roles,
        }
    }
}
