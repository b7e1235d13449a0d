//! Seams to the identity provider and to outgoing e-mail

use super::types::{AuthEvent, Registration, Session};
use crate::utils::error::Result;
use crate::utils::logging::mask_email;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Identity and session backend
///
/// Every method reports failures as a [`GlowError`](crate::utils::error::GlowError);
/// the session provider turns them into user-facing notices.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Register an identity and send its verification e-mail
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Registration>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Session>;

    /// End a session; ending an already ended session is not an error
    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Send a recovery link; unknown addresses are silently ignored
    async fn reset_password_for_email(&self, email: &str) -> Result<()>;

    /// Trade a recovery link token for a short session allowed to set a new password
    async fn exchange_recovery_token(&self, token: &str) -> Result<Session>;

    async fn update_password(&self, session: &Session, new_password: &str) -> Result<()>;

    /// Confirm an e-mail address from its verification link
    async fn verify_email(&self, token: &str) -> Result<()>;

    /// Rebuild a session from a stored access token
    async fn restore_session(&self, access_token: &str) -> Result<Session>;

    /// Rotate a refresh token into a fresh session
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session>;

    /// Auth-state change stream
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// An e-mail about to be sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Single-use link carried by the message, when any
    pub link: Option<String>,
}

/// Outgoing e-mail delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

/// Writes messages to the log instead of delivering them
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        info!(
            to = %mask_email(&mail.to),
            subject = %mail.subject,
            "Outgoing e-mail"
        );
        if let Some(link) = &mail.link {
            debug!("E-mail link: {}", link);
        }
        Ok(())
    }
}

/// Keeps every message in memory, for local development and tests
#[derive(Debug, Default)]
pub struct OutboxMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().clone()
    }

    /// Link of the most recent message sent to `to`
    pub fn last_link_to(&self, to: &str) -> Option<String> {
        self.sent
            .lock()
            .iter()
            .rev()
            .find(|mail| mail.to.eq_ignore_ascii_case(to))
            .and_then(|mail| mail.link.clone())
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        self.sent.lock().push(mail);
        Ok(())
    }
}
