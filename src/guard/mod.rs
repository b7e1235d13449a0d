//! Route guards
//!
//! Two guards wrap every protected screen: [`AuthGuard`] needs any
//! authenticated session and sends visitors to the login page, while
//! [`PermissionGuard`] needs a role and/or a resource permission and sends
//! the user to a fallback screen. [`Guarded`] chains them; the first guard
//! that does not render decides.

mod auth;
mod permission;
#[cfg(test)]
mod tests;

pub use auth::AuthGuard;
pub use permission::{PermissionGuard, PermissionState};

use crate::auth::{AuthState, SessionProvider};
use crate::auth::rbac::PermissionResolver;
use serde::Serialize;

/// Dashboard route, the default permission fallback
pub const DASHBOARD_ROUTE: &str = "/";

/// Where a guarded navigation goes instead of the screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    /// Location to come back to after signing in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

/// Outcome of running a guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Still resolving; show a skeleton and do not redirect
    Placeholder,
    /// Show the wrapped screen
    Render,
    Redirect(Redirect),
}

impl GuardDecision {
    pub fn redirect<S: Into<String>>(to: S) -> Self {
        GuardDecision::Redirect(Redirect {
            to: to.into(),
            return_to: None,
        })
    }

    pub fn renders(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Redirect(redirect) => Some(&redirect.to),
            _ => None,
        }
    }
}

/// A screen wrapped in guards, evaluated in order
#[derive(Debug, Clone)]
pub struct Guarded {
    location: String,
    require_auth: bool,
    permissions: Vec<PermissionGuard>,
}

impl Guarded {
    pub fn new<S: Into<String>>(location: S) -> Self {
        Self {
            location: location.into(),
            require_auth: false,
            permissions: Vec::new(),
        }
    }

    /// Wrap in the authentication guard
    pub fn auth(mut self) -> Self {
        self.require_auth = true;
        self
    }

    /// Wrap in a permission guard
    pub fn permission(mut self, guard: PermissionGuard) -> Self {
        self.permissions.push(guard);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Evaluate against the provider, capturing the location when the
    /// visitor is sent to sign in
    pub async fn evaluate(
        &self,
        provider: &SessionProvider,
        resolver: &PermissionResolver,
    ) -> GuardDecision {
        let decision = self.decide(&provider.state(), resolver).await;
        if let GuardDecision::Redirect(Redirect {
            return_to: Some(return_to),
            ..
        }) = &decision
        {
            provider.remember_return_to(return_to.clone());
        }
        decision
    }

    /// Stateless decision for an already known authentication state
    pub async fn decide(&self, state: &AuthState, resolver: &PermissionResolver) -> GuardDecision {
        if self.require_auth {
            let decision = AuthGuard::evaluate(state, &self.location);
            if !decision.renders() {
                return decision;
            }
        }

        for guard in &self.permissions {
            let decision = guard.evaluate(resolver, state.session()).await;
            if !decision.renders() {
                return decision;
            }
        }
        GuardDecision::Render
    }
}
