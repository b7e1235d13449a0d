//! Dashboard navigation
//!
//! The [`RouteTable`] maps every client-side path to its screen and access
//! rule, the [`Navigator`] runs the guards of the matched route, and the
//! [`NavigationShell`] models the sidebar around protected screens.

mod routes;
mod shell;
#[cfg(test)]
mod tests;

pub use routes::{Access, RouteMatch, RouteSpec, RouteTable, Screen, normalize};
pub use shell::{NavItem, NavigationShell, SIDEBAR, ShellItem};

use crate::auth::{AuthState, SessionProvider};
use crate::auth::rbac::PermissionResolver;
use crate::guard::{GuardDecision, Redirect};
use serde::Serialize;
use tracing::debug;

/// Outcome of following a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub path: String,
    pub screen: Screen,
    /// Value of the route's `:param` segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(flatten)]
    pub decision: GuardDecision,
}

impl Navigation {
    pub fn renders(&self) -> bool {
        self.decision.renders()
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.decision.redirect_target()
    }
}

/// Resolves locations and applies their guards
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    table: RouteTable,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decide what `location` shows for the provider's current session
    ///
    /// A redirect to the login page remembers `location` for the next
    /// sign-in.
    pub async fn navigate(
        &self,
        location: &str,
        provider: &SessionProvider,
        resolver: &PermissionResolver,
    ) -> Navigation {
        let navigation = self.route(location, &provider.state(), resolver).await;
        if let GuardDecision::Redirect(Redirect {
            return_to: Some(return_to),
            ..
        }) = &navigation.decision
        {
            provider.remember_return_to(return_to.clone());
        }
        navigation
    }

    /// Decide what `location` shows for a known authentication state
    ///
    /// Unknown paths render the not-found screen without any guard.
    pub async fn route(
        &self,
        location: &str,
        state: &AuthState,
        resolver: &PermissionResolver,
    ) -> Navigation {
        let path = normalize(location);
        let Some(matched) = self.table.resolve(&path) else {
            debug!("No route for {}", path);
            return Navigation {
                path,
                screen: Screen::NotFound,
                param: None,
                decision: GuardDecision::Render,
            };
        };

        let decision = matched
            .route
            .access
            .guarded(location)
            .decide(state, resolver)
            .await;
        debug!(
            "Navigation to {} ({:?}): {:?}",
            path, matched.route.screen, decision
        );

        Navigation {
            screen: matched.route.screen,
            param: matched.param,
            path,
            decision,
        }
    }
}
