//! Role resolution against the database role store

#[cfg(test)]
mod tests {
    use crate::common::{TestAccount, TestApp};
    use glowdesk::auth::rbac::{PermissionKind, Resource, Role};
    use glowdesk::config::Config;

    #[tokio::test]
    async fn test_user_without_roles_is_denied_everything() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "new@salon.test", &[]).await;

        for resource in Resource::ALL {
            assert!(!app.resolver.can_read(account.user_id, resource).await);
            assert!(!app.resolver.can_write(account.user_id, resource).await);
            assert!(!app.resolver.can_delete(account.user_id, resource).await);
        }
    }

    #[tokio::test]
    async fn test_any_granting_role_is_enough() {
        let app = TestApp::new().await;
        let account = TestAccount::create(
            &app,
            "mixed@salon.test",
            &[Role::Employee, Role::SocialManager],
        )
        .await;
        let user = account.user_id;

        assert!(app.resolver.can_delete(user, Resource::SocialMedia).await);
        assert!(app.resolver.can_write(user, Resource::Inventory).await);
        assert!(app.resolver.can_delete(user, Resource::Appointments).await);
        assert!(!app.resolver.can_read(user, Resource::Finances).await);

        let check = app
            .resolver
            .check(user, Resource::Notifications, PermissionKind::Write)
            .await;
        assert!(check.granted);
        assert_eq!(check.granted_by, vec![Role::Employee, Role::SocialManager]);
    }

    #[tokio::test]
    async fn test_revoked_role_is_not_served_from_cache() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "temp@salon.test", &[Role::Owner]).await;
        assert!(app.resolver.can_read(account.user_id, Resource::Finances).await);

        app.resolver
            .revoke_role(account.user_id, Role::Owner)
            .await
            .unwrap();
        assert!(!app.resolver.can_read(account.user_id, Resource::Finances).await);
    }

    #[tokio::test]
    async fn test_bootstrap_address_becomes_admin() {
        let mut config = Config::default();
        config.rbac.bootstrap_admins = vec!["Boss@Salon.test".to_string()];
        let app = TestApp::with_config(config).await;

        let boss = TestAccount::create(&app, "boss@salon.test", &[]).await;
        let other = TestAccount::create(&app, "other@salon.test", &[]).await;

        assert!(app.resolver.has_role(boss.user_id, Role::Admin).await.unwrap());
        assert!(!app.resolver.has_role(other.user_id, Role::Admin).await.unwrap());
        assert!(app.resolver.can_delete(boss.user_id, Resource::Users).await);
    }
}
