use super::{DASHBOARD_ROUTE, GuardDecision};
use crate::auth::Session;
use crate::auth::rbac::{PermissionKind, PermissionResolver, Resource, Role};
use crate::utils::logging::SecurityLog;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Progress of a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Resolving,
    Granted,
    Denied,
}

/// Requires a role and/or a resource permission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGuard {
    pub required_role: Option<Role>,
    pub required_permission: Option<(Resource, PermissionKind)>,
    /// Where a denied user is sent
    pub fallback: String,
}

impl PermissionGuard {
    pub fn role(role: Role) -> Self {
        Self {
            required_role: Some(role),
            required_permission: None,
            fallback: DASHBOARD_ROUTE.to_string(),
        }
    }

    pub fn permission(resource: Resource, kind: PermissionKind) -> Self {
        Self {
            required_role: None,
            required_permission: Some((resource, kind)),
            fallback: DASHBOARD_ROUTE.to_string(),
        }
    }

    /// Also require a resource permission
    pub fn and_permission(mut self, resource: Resource, kind: PermissionKind) -> Self {
        self.required_permission = Some((resource, kind));
        self
    }

    pub fn with_fallback<S: Into<String>>(mut self, fallback: S) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Check every requirement for a user
    pub async fn resolve(&self, resolver: &PermissionResolver, user_id: Uuid) -> PermissionState {
        if let Some(role) = self.required_role {
            match resolver.has_role(user_id, role).await {
                Ok(true) => {}
                Ok(false) => {
                    SecurityLog::access_denied(user_id, &format!("role:{}", role), "role not held");
                    return PermissionState::Denied;
                }
                Err(e) => {
                    debug!("Role check for {} failed: {}", user_id, e);
                    return PermissionState::Denied;
                }
            }
        }

        if let Some((resource, kind)) = self.required_permission {
            if !resolver.authorize(user_id, resource, kind).await.granted {
                return PermissionState::Denied;
            }
        }

        PermissionState::Granted
    }

    pub fn decision(&self, state: PermissionState) -> GuardDecision {
        match state {
            PermissionState::Resolving => GuardDecision::Placeholder,
            PermissionState::Granted => GuardDecision::Render,
            PermissionState::Denied => GuardDecision::redirect(self.fallback.clone()),
        }
    }

    /// Resolve and decide; without a session the guard denies
    pub async fn evaluate(
        &self,
        resolver: &PermissionResolver,
        session: Option<&Session>,
    ) -> GuardDecision {
        let state = match session {
            Some(session) => self.resolve(resolver, session.user_id).await,
            None => PermissionState::Denied,
        };
        self.decision(state)
    }
}
