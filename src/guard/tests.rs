//! Tests for the route guards

#[cfg(test)]
mod tests {
    use crate::auth::rbac::{
        InMemoryRoleStore, PermissionKind, PermissionResolver, Resource, Role, RoleStore,
    };
    use crate::auth::testing::StubIdentity;
    use crate::auth::{AuthState, SessionProvider};
    use crate::guard::{
        AuthGuard, GuardDecision, Guarded, PermissionGuard, PermissionState, Redirect,
    };
    use std::sync::Arc;

    async fn signed_in(roles: &[Role]) -> (SessionProvider, PermissionResolver) {
        let backend = StubIdentity::new();
        let store = Arc::new(InMemoryRoleStore::new());
        for role in roles {
            store.assign(backend.session.user_id, *role).await.unwrap();
        }
        let provider = SessionProvider::start(Arc::new(backend), Some("access".to_string())).await;
        (provider, PermissionResolver::uncached(store))
    }

    #[test]
    fn test_loading_renders_placeholder() {
        assert_eq!(
            AuthGuard::evaluate(&AuthState::Loading, "/customers"),
            GuardDecision::Placeholder
        );
    }

    #[test]
    fn test_unauthenticated_redirects_to_login_with_location() {
        assert_eq!(
            AuthGuard::evaluate(&AuthState::Unauthenticated, "/customers?page=2"),
            GuardDecision::Redirect(Redirect {
                to: "/login".to_string(),
                return_to: Some("/customers?page=2".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_auth_guard_captures_return_location() {
        let provider = SessionProvider::start(Arc::new(StubIdentity::new()), None).await;

        let decision = AuthGuard::guard(&provider, "/inventory");
        assert_eq!(decision.redirect_target(), Some("/login"));

        let outcome = provider
            .sign_in("ana@example.com", "secret-password", false)
            .await;
        assert_eq!(outcome.redirect_to.as_deref(), Some("/inventory"));
        assert!(AuthGuard::guard(&provider, "/inventory").renders());
    }

    #[tokio::test]
    async fn test_permission_guard_denial_uses_fallback_not_login() {
        let (provider, resolver) = signed_in(&[Role::Employee]).await;
        let session = provider.session();

        let guard = PermissionGuard::permission(Resource::Finances, PermissionKind::Read);
        let decision = guard.evaluate(&resolver, session.as_ref()).await;
        assert_eq!(decision, GuardDecision::redirect("/"));

        let guard = PermissionGuard::role(Role::Admin).with_fallback("/settings");
        let decision = guard.evaluate(&resolver, session.as_ref()).await;
        assert_eq!(decision.redirect_target(), Some("/settings"));
    }

    #[tokio::test]
    async fn test_permission_guard_grants_held_permission() {
        let (provider, resolver) = signed_in(&[Role::Employee]).await;
        let guard = PermissionGuard::permission(Resource::Appointments, PermissionKind::Delete);
        assert!(guard.evaluate(&resolver, provider.session().as_ref()).await.renders());
    }

    #[tokio::test]
    async fn test_role_and_permission_both_required() {
        let (provider, resolver) = signed_in(&[Role::Owner]).await;
        let guard = PermissionGuard::role(Role::Owner)
            .and_permission(Resource::Users, PermissionKind::Delete);

        let user_id = provider.session().unwrap().user_id;
        assert_eq!(guard.resolve(&resolver, user_id).await, PermissionState::Denied);
    }

    #[test]
    fn test_resolving_renders_placeholder() {
        let guard = PermissionGuard::role(Role::Admin);
        assert_eq!(
            guard.decision(PermissionState::Resolving),
            GuardDecision::Placeholder
        );
    }

    #[tokio::test]
    async fn test_guards_compose_in_order() {
        let provider = SessionProvider::start(Arc::new(StubIdentity::new()), None).await;
        let resolver = PermissionResolver::uncached(Arc::new(InMemoryRoleStore::new()));

        let guarded = Guarded::new("/finances")
            .auth()
            .permission(PermissionGuard::permission(Resource::Finances, PermissionKind::Read));

        // the authentication guard decides first
        let decision = guarded.evaluate(&provider, &resolver).await;
        assert_eq!(decision.redirect_target(), Some("/login"));
    }

    #[tokio::test]
    async fn test_zero_roles_denied_by_permission_guard() {
        let (provider, resolver) = signed_in(&[]).await;
        let guarded = Guarded::new("/")
            .auth()
            .permission(PermissionGuard::permission(Resource::Dashboard, PermissionKind::Read));

        let decision = guarded.evaluate(&provider, &resolver).await;
        assert_eq!(decision, GuardDecision::redirect("/"));
    }
}
