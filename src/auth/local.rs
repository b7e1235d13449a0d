//! Identity backend on top of the local database

use super::backend::{IdentityBackend, Mailer, OutgoingMail};
use super::jwt::{AccessGrant, JwtHandler};
use super::rate_limiter::SignInLimiter;
use super::rbac::{PermissionResolver, Role};
use super::types::{AuthEvent, AuthEventKind, Registration, Session};
use crate::config::{AuthConfig, Config, RbacConfig, ServerConfig};
use crate::storage::database::entities::user;
use crate::storage::database::{Database, LinkPurpose, NewAccount};
use crate::utils::crypto::{generate_token, hash_password, token_digest, verify_password};
use crate::utils::error::{GlowError, Result};
use crate::utils::logging::SecurityLog;
use crate::utils::validation::{check_password, normalize_email, require};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Bytes of entropy in refresh and link tokens
const TOKEN_BYTES: usize = 32;
const EVENT_CAPACITY: usize = 64;

/// Argon2 passwords, JWT access tokens and server-side sessions
pub struct LocalIdentity {
    db: Database,
    jwt: JwtHandler,
    auth: AuthConfig,
    rbac: RbacConfig,
    server: ServerConfig,
    resolver: PermissionResolver,
    mailer: Arc<dyn Mailer>,
    limiter: SignInLimiter,
    events: broadcast::Sender<AuthEvent>,
}

impl std::fmt::Debug for LocalIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalIdentity")
            .field("jwt", &self.jwt)
            .field("listeners", &self.events.receiver_count())
            .finish()
    }
}

impl LocalIdentity {
    pub fn new(
        db: Database,
        config: &Config,
        resolver: PermissionResolver,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            jwt: JwtHandler::new(&config.auth),
            limiter: SignInLimiter::from_config(&config.auth),
            auth: config.auth.clone(),
            rbac: config.rbac.clone(),
            server: config.server.clone(),
            db,
            resolver,
            mailer,
            events,
        }
    }

    /// Resolve a bearer token into its live session
    pub async fn authenticate(&self, access_token: &str) -> Result<Session> {
        self.restore_session(access_token).await
    }

    fn publish(&self, event: AuthEvent) {
        debug!("Auth event {:?} for user {}", event.kind, event.user_id);
        // No subscriber is not an error
        let _ = self.events.send(event);
    }

    /// Give configured bootstrap addresses the admin role
    async fn ensure_bootstrap_admin(&self, user: &user::Model) -> Result<()> {
        if !self.rbac.is_bootstrap_admin(&user.email) {
            return Ok(());
        }
        if !self.resolver.has_role(user.id, Role::Admin).await? {
            self.resolver.assign_role(user.id, Role::Admin).await?;
            SecurityLog::role_change(None, user.id, Role::Admin.as_str(), true);
            info!("Granted admin role to bootstrap account {}", user.id);
        }
        Ok(())
    }

    async fn issue_session(
        &self,
        user: &user::Model,
        remember_me: bool,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        let session_id = uuid::Uuid::new_v4();
        let expires_at = now + self.auth.session_lifetime(remember_me);
        let refresh_token = remember_me.then(|| generate_token(TOKEN_BYTES));

        self.db
            .create_session(
                session_id,
                user.id,
                refresh_token.as_deref().map(token_digest),
                remember_me,
                expires_at,
            )
            .await?;

        let access_token = self.jwt.create_access_token(AccessGrant {
            user_id: user.id,
            session_id,
            email: &user.email,
            display_name: &user.display_name,
            issued_at: now,
            expires_at,
        })?;

        Ok(Session {
            session_id,
            user_id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            issued_at: now,
            expires_at,
            access_token,
            refresh_token,
            remember_me,
        })
    }

    async fn send_link(&self, to: &str, subject: &str, body: &str, path: String) -> Result<()> {
        let link = self.server.link(&path);
        self.mailer
            .send(OutgoingMail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: format!("{}\n\n{}", body, link),
                link: Some(link),
            })
            .await
    }

    async fn require_user(&self, user_id: uuid::Uuid) -> Result<user::Model> {
        self.db
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| GlowError::session("account no longer exists"))
    }
}

#[async_trait]
impl IdentityBackend for LocalIdentity {
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Registration> {
        let email = normalize_email(email)?;
        let full_name = require("full name", full_name)?;
        check_password(password, self.auth.min_password_length)?;

        let hash = hash_password(password)?;
        let token = generate_token(TOKEN_BYTES);
        let digest = token_digest(&token);
        let bootstrap = self.rbac.is_bootstrap_admin(&email);
        let roles: &[Role] = if bootstrap { &[Role::Admin] } else { &[] };
        let account = NewAccount {
            email: &email,
            password_hash: &hash,
            display_name: &full_name,
            verification_digest: &digest,
            verification_expires_at: Utc::now()
                + Duration::seconds(self.auth.email_verification_ttl as i64),
            roles,
        };
        let user = match self.db.register_user(account).await {
            Ok(user) => user,
            Err(e) => {
                SecurityLog::auth_event("sign_up", &email, None, false);
                return Err(e);
            }
        };
        if bootstrap {
            self.resolver.invalidate(user.id).await;
            SecurityLog::role_change(None, user.id, Role::Admin.as_str(), true);
            info!("Granted admin role to bootstrap account {}", user.id);
        }
        if let Err(e) = self
            .send_link(
                &email,
                "Confirm your e-mail address",
                "Open this link to confirm your GlowDesk account:",
                format!("/verify-email?token={}", token),
            )
            .await
        {
            warn!("Verification e-mail for user {} failed: {}", user.id, e);
        }

        SecurityLog::auth_event("sign_up", &email, Some(user.id), true);
        Ok(Registration {
            user_id: user.id,
            email,
            confirmation_required: self.auth.require_email_confirmation,
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Session> {
        let Ok(email) = normalize_email(email) else {
            return Err(GlowError::auth("malformed e-mail address"));
        };

        if let Err(remaining) = self.limiter.check_allowed(&email) {
            SecurityLog::auth_event("sign_in", &email, None, false);
            return Err(GlowError::rate_limit(format!(
                "sign-in locked for {} more seconds",
                remaining
            )));
        }

        let user = match self.db.find_user_by_email(&email).await? {
            Some(user) if verify_password(password, &user.password_hash)? => user,
            found => {
                self.limiter.record_failure(&email);
                SecurityLog::auth_event("sign_in", &email, found.map(|u| u.id), false);
                return Err(GlowError::auth("invalid e-mail or password"));
            }
        };

        if self.auth.require_email_confirmation && !user.email_verified {
            SecurityLog::auth_event("sign_in", &email, Some(user.id), false);
            return Err(GlowError::Unconfirmed(email));
        }

        self.limiter.record_success(&email);
        let now = Utc::now();
        self.db.record_sign_in(user.id, now).await?;
        self.ensure_bootstrap_admin(&user).await?;

        let session = self.issue_session(&user, remember_me, now).await?;
        SecurityLog::auth_event("sign_in", &email, Some(user.id), true);
        self.publish(AuthEvent::with_session(AuthEventKind::SignedIn, &session));
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        if self.db.revoke_session(session.session_id, Utc::now()).await? {
            SecurityLog::auth_event("sign_out", &session.email, Some(session.user_id), true);
            self.publish(AuthEvent::signed_out(session.user_id, session.session_id));
        }
        Ok(())
    }

    async fn reset_password_for_email(&self, email: &str) -> Result<()> {
        let email = normalize_email(email)?;
        let Some(user) = self.db.find_user_by_email(&email).await? else {
            debug!("Password reset requested for unknown address");
            return Ok(());
        };

        let token = generate_token(TOKEN_BYTES);
        let expires_at = Utc::now() + Duration::seconds(self.auth.recovery_token_ttl as i64);
        self.db
            .store_link_token(LinkPurpose::PasswordReset, user.id, &token_digest(&token), expires_at)
            .await?;
        self.send_link(
            &email,
            "Reset your password",
            "Open this link to choose a new GlowDesk password:",
            format!("/update-password?token={}", token),
        )
        .await?;

        SecurityLog::auth_event("password_reset_requested", &email, Some(user.id), true);
        Ok(())
    }

    async fn exchange_recovery_token(&self, token: &str) -> Result<Session> {
        let now = Utc::now();
        let user_id = self
            .db
            .consume_link_token(LinkPurpose::PasswordReset, &token_digest(token), now)
            .await?
            .ok_or_else(|| GlowError::gone("recovery link expired or already used"))?;

        let user = self.require_user(user_id).await?;
        let session = self.issue_session(&user, false, now).await?;
        SecurityLog::auth_event("password_recovery", &user.email, Some(user.id), true);
        self.publish(AuthEvent::with_session(AuthEventKind::PasswordRecovery, &session));
        Ok(session)
    }

    async fn update_password(&self, session: &Session, new_password: &str) -> Result<()> {
        let now = Utc::now();
        self.db.require_live_session(session.session_id, now).await?;
        check_password(new_password, self.auth.min_password_length)?;

        let hash = hash_password(new_password)?;
        self.db.update_user_password(session.user_id, &hash).await?;

        // Every other device has to sign in again with the new password
        let revoked = self
            .db
            .revoke_user_sessions(session.user_id, Some(session.session_id), now)
            .await?;
        for session_id in revoked {
            self.publish(AuthEvent::signed_out(session.user_id, session_id));
        }

        let user = self.require_user(session.user_id).await?;
        SecurityLog::auth_event("password_updated", &user.email, Some(user.id), true);
        self.publish(AuthEvent::user_updated(user.id, &user.email, &user.display_name));
        Ok(())
    }

    async fn verify_email(&self, token: &str) -> Result<()> {
        let user_id = self
            .db
            .consume_link_token(LinkPurpose::EmailVerification, &token_digest(token), Utc::now())
            .await?
            .ok_or_else(|| GlowError::gone("verification link expired or already used"))?;

        let user = self.db.mark_email_verified(user_id).await?;
        SecurityLog::auth_event("email_verified", &user.email, Some(user.id), true);
        self.publish(AuthEvent::user_updated(user.id, &user.email, &user.display_name));
        Ok(())
    }

    async fn restore_session(&self, access_token: &str) -> Result<Session> {
        let claims = self
            .jwt
            .verify_token(access_token)
            .map_err(|_| GlowError::session("invalid or expired access token"))?;

        let now = Utc::now();
        let stored = self.db.require_live_session(claims.sid, now).await?;
        if stored.user_id != claims.sub {
            return Err(GlowError::session("token does not match its session"));
        }

        Ok(Session {
            session_id: stored.id,
            user_id: stored.user_id,
            email: claims.email,
            display_name: claims.name,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or(stored.created_at),
            expires_at: stored.expires_at,
            access_token: access_token.to_string(),
            refresh_token: None,
            remember_me: stored.remember_me,
        })
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let now = Utc::now();
        let stored = self
            .db
            .find_session_by_refresh_digest(&token_digest(refresh_token))
            .await?
            .filter(|s| s.is_live(now))
            .ok_or_else(|| GlowError::session("refresh token expired or revoked"))?;

        let user = self.require_user(stored.user_id).await?;
        let refresh_token = generate_token(TOKEN_BYTES);
        let expires_at = now + self.auth.session_lifetime(true);
        let stored = self
            .db
            .rotate_session(stored, token_digest(&refresh_token), expires_at, now)
            .await?;

        let access_token = self.jwt.create_access_token(AccessGrant {
            user_id: user.id,
            session_id: stored.id,
            email: &user.email,
            display_name: &user.display_name,
            issued_at: now,
            expires_at,
        })?;

        let session = Session {
            session_id: stored.id,
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            issued_at: now,
            expires_at,
            access_token,
            refresh_token: Some(refresh_token),
            remember_me: true,
        };
        self.publish(AuthEvent::with_session(AuthEventKind::TokenRefreshed, &session));
        Ok(session)
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
