use super::{GuardDecision, Redirect};
use crate::auth::{AuthState, LOGIN_ROUTE, SessionProvider};

/// Requires any authenticated session
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGuard;

impl AuthGuard {
    /// Pure decision for a state and the requested location
    pub fn evaluate(state: &AuthState, location: &str) -> GuardDecision {
        match state {
            AuthState::Loading => GuardDecision::Placeholder,
            AuthState::Authenticated(_) => GuardDecision::Render,
            AuthState::Unauthenticated => GuardDecision::Redirect(Redirect {
                to: LOGIN_ROUTE.to_string(),
                return_to: Some(location.to_string()),
            }),
        }
    }

    /// Decide for the provider's state, capturing the location on redirect so
    /// the next sign-in comes back to it
    pub fn guard(provider: &SessionProvider, location: &str) -> GuardDecision {
        let decision = Self::evaluate(&provider.state(), location);
        if let GuardDecision::Redirect(Redirect {
            return_to: Some(return_to),
            ..
        }) = &decision
        {
            provider.remember_return_to(return_to.clone());
        }
        decision
    }
}
