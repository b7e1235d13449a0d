//! Tests for routing and the navigation shell

#[cfg(test)]
mod tests {
    use crate::auth::SessionProvider;
    use crate::auth::rbac::{
        InMemoryRoleStore, PermissionResolver, Resource, Role, RoleStore,
    };
    use crate::auth::testing::StubIdentity;
    use crate::guard::GuardDecision;
    use crate::navigation::{NavigationShell, Navigator, RouteTable, Screen, normalize};
    use std::sync::Arc;

    async fn session_with(roles: &[Role]) -> (SessionProvider, PermissionResolver) {
        let backend = StubIdentity::new();
        let store = Arc::new(InMemoryRoleStore::new());
        for role in roles {
            store.assign(backend.session.user_id, *role).await.unwrap();
        }
        let provider = SessionProvider::start(Arc::new(backend), Some("access".to_string())).await;
        (provider, PermissionResolver::uncached(store))
    }

    async fn shell_for(roles: &[Role], location: &str) -> NavigationShell {
        let (provider, resolver) = session_with(roles).await;
        let user_id = provider.session().unwrap().user_id;
        let permissions = resolver.effective_permissions(user_id).await.unwrap();
        NavigationShell::new(&permissions, location)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/customers/?page=2"), "/customers");
        assert_eq!(normalize("settings#users"), "/settings");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn test_literal_route_wins_over_parameter() {
        let table = RouteTable::standard();

        let new = table.resolve("/customers/new").unwrap();
        assert_eq!(new.route.screen, Screen::CustomerForm);
        assert_eq!(new.param, None);

        let detail = table.resolve("/customers/3f1c").unwrap();
        assert_eq!(detail.route.screen, Screen::CustomerDetail);
        assert_eq!(detail.param.as_deref(), Some("3f1c"));
    }

    #[test]
    fn test_unknown_paths_do_not_match() {
        let table = RouteTable::standard();
        assert!(table.resolve("/reports").is_none());
        assert!(table.resolve("/cancel").is_none());
        assert!(table.resolve("/customers/1/edit").is_none());
    }

    #[test]
    fn test_every_screen_has_one_route() {
        let table = RouteTable::standard();
        let mut seen = std::collections::HashSet::new();
        for route in table.routes() {
            assert!(seen.insert(route.screen), "{:?} routed twice", route.screen);
        }
        assert_eq!(table.path_of(Screen::UserManagement), Some("/settings/users"));
    }

    #[tokio::test]
    async fn test_employee_is_sent_from_user_management_to_settings() {
        let (provider, resolver) = session_with(&[Role::Employee]).await;
        let navigator = Navigator::default();

        let users = navigator.navigate("/settings/users", &provider, &resolver).await;
        assert_eq!(users.screen, Screen::UserManagement);
        assert_eq!(users.redirect_target(), Some("/settings"));

        let settings = navigator.navigate("/settings", &provider, &resolver).await;
        assert_eq!(settings.screen, Screen::Settings);
        assert!(settings.renders());
    }

    #[tokio::test]
    async fn test_admin_opens_user_management() {
        let (provider, resolver) = session_with(&[Role::Admin]).await;
        let navigation = Navigator::default()
            .navigate("/settings/users", &provider, &resolver)
            .await;
        assert!(navigation.renders());
    }

    #[tokio::test]
    async fn test_visitor_is_sent_to_login_and_back() {
        let provider = SessionProvider::start(Arc::new(StubIdentity::new()), None).await;
        let resolver = PermissionResolver::uncached(Arc::new(InMemoryRoleStore::new()));
        let navigator = Navigator::default();

        let navigation = navigator.navigate("/inventory?low=1", &provider, &resolver).await;
        match &navigation.decision {
            GuardDecision::Redirect(redirect) => {
                assert_eq!(redirect.to, "/login");
                assert_eq!(redirect.return_to.as_deref(), Some("/inventory?low=1"));
            }
            other => panic!("expected a redirect, got {:?}", other),
        }

        let outcome = provider
            .sign_in("ana@example.com", "secret-password", true)
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.redirect_to.as_deref(), Some("/inventory?low=1"));
    }

    #[tokio::test]
    async fn test_public_routes_render_without_session() {
        let provider = SessionProvider::start(Arc::new(StubIdentity::new()), None).await;
        let resolver = PermissionResolver::uncached(Arc::new(InMemoryRoleStore::new()));
        let navigator = Navigator::default();

        let cancel = navigator.navigate("/cancel/abc123", &provider, &resolver).await;
        assert_eq!(cancel.screen, Screen::CancelAppointment);
        assert_eq!(cancel.param.as_deref(), Some("abc123"));
        assert!(cancel.renders());

        let missing = navigator.navigate("/nowhere", &provider, &resolver).await;
        assert_eq!(missing.screen, Screen::NotFound);
        assert!(missing.renders());
    }

    #[tokio::test]
    async fn test_denied_screen_falls_back_to_dashboard() {
        let (provider, resolver) = session_with(&[Role::SocialManager]).await;
        let navigation = Navigator::default()
            .navigate("/finances", &provider, &resolver)
            .await;
        assert_eq!(navigation.redirect_target(), Some("/"));
    }

    #[tokio::test]
    async fn test_user_without_roles_still_reaches_dashboard() {
        let (provider, resolver) = session_with(&[]).await;
        let navigation = Navigator::default().navigate("/", &provider, &resolver).await;
        assert!(navigation.renders());
    }

    #[tokio::test]
    async fn test_sidebar_follows_read_permissions() {
        let shell = shell_for(&[Role::SocialManager], "/marketing").await;
        let resources: Vec<Resource> = shell.items().iter().map(|i| i.resource).collect();

        assert!(resources.contains(&Resource::Marketing));
        assert!(resources.contains(&Resource::SocialMedia));
        assert!(!resources.contains(&Resource::Finances));
        assert!(!resources.contains(&Resource::Inventory));
    }

    #[tokio::test]
    async fn test_active_highlighting() {
        let shell = shell_for(&[Role::Owner], "/customers/42").await;
        let active: Vec<&str> = shell
            .view()
            .into_iter()
            .filter(|item| item.active)
            .map(|item| item.item.path)
            .collect();
        assert_eq!(active, vec!["/customers"]);

        let home = shell_for(&[Role::Owner], "/").await;
        assert_eq!(home.active_item().map(|i| i.path), Some("/"));
    }

    #[tokio::test]
    async fn test_drawer_closes_on_navigation() {
        let mut shell = shell_for(&[Role::Employee], "/").await;
        assert!(!shell.is_drawer_open());

        shell.toggle_drawer();
        assert!(shell.is_drawer_open());
        shell.navigate("/tasks");
        assert!(!shell.is_drawer_open());
        assert_eq!(shell.active_item().map(|i| i.label), Some("Tasks"));

        shell.open_drawer();
        shell.close_drawer();
        assert!(!shell.is_drawer_open());
    }
}
