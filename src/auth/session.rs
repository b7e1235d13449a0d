//! Session provider
//!
//! Holds the current identity of one client, follows the backend's
//! auth-state changes for that identity and exposes the sign-in family of
//! operations as [`AuthOutcome`]s that never fail.

use super::backend::IdentityBackend;
use super::types::{AuthEvent, AuthEventKind, AuthOutcome, AuthState, DEFAULT_LANDING, LOGIN_ROUTE, Session};
use crate::utils::error::GlowError;
use crate::utils::lifecycle::Scope;
use crate::utils::messages::Notice;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

/// Where a completed password recovery lands
pub const UPDATE_PASSWORD_ROUTE: &str = "/update-password";

/// Explicitly injected handle to the current session
pub struct SessionProvider {
    backend: Arc<dyn IdentityBackend>,
    state: Arc<watch::Sender<AuthState>>,
    return_to: Mutex<Option<String>>,
    scope: Scope,
}

impl std::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("state", &*self.state.borrow())
            .field("closed", &self.scope.is_closed())
            .finish()
    }
}

impl SessionProvider {
    /// Provider in the `Loading` state, already following backend events
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(backend: Arc<dyn IdentityBackend>) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        let provider = Self {
            backend,
            state: Arc::new(state),
            return_to: Mutex::new(None),
            scope: Scope::new(),
        };
        provider.follow_events();
        provider
    }

    /// Create a provider and resolve its stored session, if any
    pub async fn start(backend: Arc<dyn IdentityBackend>, stored_token: Option<String>) -> Self {
        Self::resume(backend, stored_token, None).await
    }

    /// Like [`start`](Self::start), also handing back the refresh token the
    /// client kept from its last sign-in or refresh
    pub async fn resume(
        backend: Arc<dyn IdentityBackend>,
        stored_token: Option<String>,
        stored_refresh: Option<String>,
    ) -> Self {
        let provider = Self::new(backend);
        provider
            .restore_with_refresh(stored_token.as_deref(), stored_refresh.as_deref())
            .await;
        provider
    }

    fn follow_events(&self) {
        let mut events = self.backend.subscribe();
        let state = Arc::clone(&self.state);
        let scope = self.scope.child();

        tokio::spawn(async move {
            loop {
                let Some(received) = scope.run(events.recv()).await else {
                    debug!("Session provider closed, leaving auth event stream");
                    break;
                };
                match received {
                    Ok(event) => apply_event(&state, event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Session provider skipped {} auth events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Resolve `Loading` from a stored access token
    pub async fn restore(&self, stored_token: Option<&str>) -> AuthState {
        self.restore_with_refresh(stored_token, None).await
    }

    /// Resolve `Loading` from stored tokens
    ///
    /// A restored "remember me" session takes the client's refresh token.
    /// Other sessions never hold one.
    pub async fn restore_with_refresh(
        &self,
        stored_token: Option<&str>,
        stored_refresh: Option<&str>,
    ) -> AuthState {
        let resolved = match stored_token {
            None => AuthState::Unauthenticated,
            Some(token) => match self.backend.restore_session(token).await {
                Ok(mut session) => {
                    if session.remember_me && session.refresh_token.is_none() {
                        session.refresh_token = stored_refresh.map(str::to_string);
                    }
                    AuthState::Authenticated(session)
                }
                Err(e) => {
                    debug!("Stored session not restored: {}", e);
                    AuthState::Unauthenticated
                }
            },
        };
        self.set_state(resolved.clone());
        resolved
    }

    /// Current state; an expired session reads as `Unauthenticated`
    pub fn state(&self) -> AuthState {
        match &*self.state.borrow() {
            AuthState::Authenticated(session) if session.is_expired(Utc::now()) => {
                AuthState::Unauthenticated
            }
            other => other.clone(),
        }
    }

    pub fn session(&self) -> Option<Session> {
        match self.state() {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// State change notifications
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Capture the protected location a visitor was sent away from
    pub fn remember_return_to<S: Into<String>>(&self, location: S) {
        *self.return_to.lock() = Some(location.into());
    }

    /// The captured location, consumed
    pub fn take_return_to(&self) -> Option<String> {
        self.return_to.lock().take()
    }

    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> AuthOutcome {
        match self.backend.sign_up(email, password, full_name).await {
            Ok(registration) => {
                info!("Registered user {}", registration.user_id);
                AuthOutcome::redirect(LOGIN_ROUTE)
            }
            Err(GlowError::Conflict(_)) => AuthOutcome::notice(Notice::EmailAlreadyRegistered),
            Err(e) => failure("sign up", e),
        }
    }

    /// Sign in and move to the captured location or the landing page
    pub async fn sign_in(&self, email: &str, password: &str, remember_me: bool) -> AuthOutcome {
        match self
            .backend
            .sign_in_with_password(email, password, remember_me)
            .await
        {
            Ok(session) => {
                self.set_state(AuthState::Authenticated(session));
                let to = self
                    .take_return_to()
                    .unwrap_or_else(|| DEFAULT_LANDING.to_string());
                AuthOutcome::redirect(to)
            }
            Err(e) => failure("sign in", e),
        }
    }

    /// End the session, if any, and send the client to the login page
    pub async fn sign_out(&self) -> AuthOutcome {
        if let Some(session) = self.current_session() {
            if let Err(e) = self.backend.sign_out(&session).await {
                warn!("Backend sign out failed, dropping session locally: {}", e);
            }
        }
        self.return_to.lock().take();
        self.set_state(AuthState::Unauthenticated);
        AuthOutcome::redirect(LOGIN_ROUTE)
    }

    pub async fn reset_password(&self, email: &str) -> AuthOutcome {
        match self.backend.reset_password_for_email(email).await {
            Ok(()) => AuthOutcome::ok(),
            Err(e) => failure("password reset", e),
        }
    }

    /// Open a session from a recovery link so a new password can be set
    pub async fn complete_recovery(&self, token: &str) -> AuthOutcome {
        match self.backend.exchange_recovery_token(token).await {
            Ok(session) => {
                self.set_state(AuthState::Authenticated(session));
                AuthOutcome::redirect(UPDATE_PASSWORD_ROUTE)
            }
            Err(e) => failure("password recovery", e),
        }
    }

    pub async fn update_password(&self, new_password: &str) -> AuthOutcome {
        let Some(session) = self.session() else {
            return AuthOutcome::notice(Notice::SessionExpired);
        };
        match self.backend.update_password(&session, new_password).await {
            Ok(()) => AuthOutcome::redirect(DEFAULT_LANDING),
            Err(e) => failure("password update", e),
        }
    }

    pub async fn verify_email(&self, token: &str) -> AuthOutcome {
        match self.backend.verify_email(token).await {
            Ok(()) => AuthOutcome::redirect(LOGIN_ROUTE),
            Err(e) => failure("e-mail verification", e),
        }
    }

    /// Rotate the refresh token of a "remember me" session
    pub async fn refresh(&self) -> AuthOutcome {
        let Some(refresh_token) = self.current_session().and_then(|s| s.refresh_token) else {
            return AuthOutcome::notice(Notice::SessionExpired);
        };
        match self.backend.refresh_session(&refresh_token).await {
            Ok(session) => {
                self.set_state(AuthState::Authenticated(session));
                AuthOutcome::ok()
            }
            Err(e) => {
                self.set_state(AuthState::Unauthenticated);
                failure("session refresh", e)
            }
        }
    }

    /// Stop following auth events. Idempotent.
    pub fn shutdown(&self) {
        if !self.scope.is_closed() {
            debug!("Shutting down session provider");
        }
        self.scope.close();
    }

    pub fn is_shut_down(&self) -> bool {
        self.scope.is_closed()
    }

    /// Session held right now, expired or not
    fn current_session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    fn set_state(&self, state: AuthState) {
        self.state.send_replace(state);
    }
}

impl Drop for SessionProvider {
    fn drop(&mut self) {
        self.scope.close();
    }
}

fn failure(operation: &str, e: GlowError) -> AuthOutcome {
    if e.is_backend_failure() {
        error!("{} failed: {}", operation, e);
    } else {
        debug!("{} rejected: {}", operation, e);
    }
    AuthOutcome::failed(&e)
}

/// Apply an event to the provider state when it concerns the held session
fn apply_event(state: &watch::Sender<AuthState>, event: AuthEvent) {
    state.send_if_modified(|current| {
        let AuthState::Authenticated(session) = current else {
            return false;
        };
        let same_session = event.session_id == Some(session.session_id);

        match event.kind {
            AuthEventKind::SignedOut if same_session => {
                debug!("Session {} ended elsewhere", session.session_id);
                *current = AuthState::Unauthenticated;
                true
            }
            AuthEventKind::TokenRefreshed if same_session => match event.session {
                Some(refreshed) if refreshed != *session => {
                    *session = refreshed;
                    true
                }
                _ => false,
            },
            AuthEventKind::UserUpdated if event.user_id == session.user_id => {
                let Some(profile) = event.profile else {
                    return false;
                };
                if profile.email == session.email && profile.display_name == session.display_name {
                    return false;
                }
                debug!("Account {} updated", event.user_id);
                session.email = profile.email;
                session.display_name = profile.display_name;
                true
            }
            _ => false,
        }
    });
}
