//! In-process identity backend for unit tests

use super::backend::IdentityBackend;
use super::types::{AuthEvent, Registration, Session};
use crate::utils::error::{GlowError, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Accepts the password `secret-password` and the access token `access`
/// for one fixed session; its sign out always fails
pub(crate) struct StubIdentity {
    pub events: broadcast::Sender<AuthEvent>,
    pub session: Session,
}

impl StubIdentity {
    pub fn new() -> Self {
        Self::for_user(Uuid::new_v4())
    }

    pub fn for_user(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            events: broadcast::channel(8).0,
            session: Session {
                session_id: Uuid::new_v4(),
                user_id,
                email: "ana@example.com".to_string(),
                display_name: "Ana".to_string(),
                issued_at: now,
                expires_at: now + Duration::hours(8),
                access_token: "access".to_string(),
                refresh_token: None,
                remember_me: false,
            },
        }
    }
}

#[async_trait]
impl IdentityBackend for StubIdentity {
    async fn sign_up(&self, email: &str, _: &str, _: &str) -> Result<Registration> {
        Err(GlowError::conflict(format!("{} exists", email)))
    }

    async fn sign_in_with_password(&self, _: &str, password: &str, _: bool) -> Result<Session> {
        if password == "secret-password" {
            Ok(self.session.clone())
        } else {
            Err(GlowError::auth("bad password"))
        }
    }

    async fn sign_out(&self, _: &Session) -> Result<()> {
        Err(GlowError::internal("backend down"))
    }

    async fn reset_password_for_email(&self, _: &str) -> Result<()> {
        Ok(())
    }

    async fn exchange_recovery_token(&self, _: &str) -> Result<Session> {
        Err(GlowError::gone("used"))
    }

    async fn update_password(&self, _: &Session, _: &str) -> Result<()> {
        Ok(())
    }

    async fn verify_email(&self, _: &str) -> Result<()> {
        Ok(())
    }

    async fn restore_session(&self, token: &str) -> Result<Session> {
        if token == "access" {
            Ok(self.session.clone())
        } else {
            Err(GlowError::session("unknown"))
        }
    }

    async fn refresh_session(&self, _: &str) -> Result<Session> {
        Err(GlowError::session("no refresh"))
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
