//! Tests for RBAC functionality

#[cfg(test)]
mod tests {
    use crate::auth::rbac::{
        InMemoryRoleStore, PermissionKind, PermissionResolver, Resource, Role, RoleAssignment,
        RoleStore, grants,
    };
    use crate::config::RbacConfig;
    use crate::utils::error::{GlowError, Result};
    use async_trait::async_trait;
    use std::sync::Arc;
    use uuid::Uuid;

    struct FailingStore;

    #[async_trait]
    impl RoleStore for FailingStore {
        async fn roles_for(&self, _user_id: Uuid) -> Result<Vec<Role>> {
            Err(GlowError::internal("store unavailable"))
        }

        async fn assign(&self, _user_id: Uuid, _role: Role) -> Result<()> {
            Err(GlowError::internal("store unavailable"))
        }

        async fn revoke(&self, _user_id: Uuid, _role: Role) -> Result<()> {
            Err(GlowError::internal("store unavailable"))
        }

        async fn users_with_roles(&self) -> Result<Vec<RoleAssignment>> {
            Err(GlowError::internal("store unavailable"))
        }
    }

    fn resolver() -> (Arc<InMemoryRoleStore>, PermissionResolver) {
        let store = Arc::new(InMemoryRoleStore::new());
        let resolver = PermissionResolver::uncached(store.clone());
        (store, resolver)
    }

    #[test]
    fn test_admin_grants_everything() {
        for resource in Resource::ALL {
            for kind in PermissionKind::ALL {
                assert!(grants(Role::Admin, resource, kind));
            }
        }
    }

    #[test]
    fn test_owner_cannot_delete_users() {
        assert!(!grants(Role::Owner, Resource::Users, PermissionKind::Delete));
        assert!(grants(Role::Owner, Resource::Users, PermissionKind::Write));
        assert!(grants(Role::Owner, Resource::Finances, PermissionKind::Delete));
    }

    #[test]
    fn test_employee_table() {
        use PermissionKind::*;
        assert!(grants(Role::Employee, Resource::Appointments, Delete));
        assert!(grants(Role::Employee, Resource::Customers, Write));
        assert!(!grants(Role::Employee, Resource::Customers, Delete));
        assert!(grants(Role::Employee, Resource::Settings, Read));
        assert!(!grants(Role::Employee, Resource::Settings, Write));
        assert!(!grants(Role::Employee, Resource::Finances, Read));
        assert!(!grants(Role::Employee, Resource::Users, Read));
    }

    #[test]
    fn test_social_manager_table() {
        use PermissionKind::*;
        assert!(grants(Role::SocialManager, Resource::SocialMedia, Delete));
        assert!(grants(Role::SocialManager, Resource::Marketing, Write));
        assert!(grants(Role::SocialManager, Resource::Customers, Read));
        assert!(!grants(Role::SocialManager, Resource::Customers, Write));
        assert!(!grants(Role::SocialManager, Resource::Appointments, Read));
    }

    #[test]
    fn test_role_wire_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!(Role::SocialManager.to_string(), "social_manager");
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(
            "social_media".parse::<Resource>().unwrap(),
            Resource::SocialMedia
        );
    }

    #[tokio::test]
    async fn test_zero_roles_denies_everything() {
        let (_store, resolver) = resolver();
        let user = Uuid::new_v4();

        for resource in Resource::ALL {
            assert!(!resolver.can_read(user, resource).await);
            assert!(!resolver.can_write(user, resource).await);
            assert!(!resolver.can_delete(user, resource).await);
        }

        let check = resolver
            .check(user, Resource::Dashboard, PermissionKind::Read)
            .await;
        assert_eq!(check.denial_reason.as_deref(), Some("user has no roles"));
    }

    #[tokio::test]
    async fn test_any_granting_role_wins() {
        let (store, resolver) = resolver();
        let user = Uuid::new_v4();
        store.assign(user, Role::Employee).await.unwrap();
        store.assign(user, Role::SocialManager).await.unwrap();

        // employee alone cannot touch social media, social manager alone cannot touch tasks
        assert!(resolver.can_delete(user, Resource::SocialMedia).await);
        assert!(resolver.can_write(user, Resource::Tasks).await);
        assert!(!resolver.can_read(user, Resource::Finances).await);

        let check = resolver
            .check(user, Resource::Notifications, PermissionKind::Write)
            .await;
        assert!(check.granted);
        assert_eq!(check.granted_by, vec![Role::Employee, Role::SocialManager]);
    }

    #[tokio::test]
    async fn test_store_failure_denies() {
        let resolver = PermissionResolver::uncached(Arc::new(FailingStore));
        let user = Uuid::new_v4();

        assert!(!resolver.can_read(user, Resource::Dashboard).await);
        assert!(resolver.get_user_roles(user).await.is_err());
    }

    #[tokio::test]
    async fn test_role_change_invalidates_cache() {
        let store = Arc::new(InMemoryRoleStore::new());
        let config = RbacConfig {
            cache_ttl_secs: 600,
            ..RbacConfig::default()
        };
        let resolver = PermissionResolver::new(store.clone(), &config);
        let user = Uuid::new_v4();

        assert!(!resolver.can_read(user, Resource::Finances).await);

        resolver.assign_role(user, Role::Owner).await.unwrap();
        assert!(resolver.can_read(user, Resource::Finances).await);

        resolver.revoke_role(user, Role::Owner).await.unwrap();
        assert!(!resolver.can_read(user, Resource::Finances).await);
        assert!(!resolver.has_role(user, Role::Owner).await.unwrap());
    }

    #[tokio::test]
    async fn test_effective_permissions_matrix() {
        let (store, resolver) = resolver();
        let user = Uuid::new_v4();
        store.assign(user, Role::Employee).await.unwrap();

        let permissions = resolver.effective_permissions(user).await.unwrap();
        assert_eq!(permissions.roles, vec![Role::Employee]);
        assert!(permissions.allows(Resource::Appointments, PermissionKind::Delete));
        assert!(!permissions.allows(Resource::Finances, PermissionKind::Read));
        assert_eq!(permissions.resources.len(), Resource::ALL.len());
    }

    #[tokio::test]
    async fn test_in_memory_store_is_idempotent() {
        let store = InMemoryRoleStore::new();
        let user = Uuid::new_v4();

        store.assign(user, Role::Owner).await.unwrap();
        store.assign(user, Role::Owner).await.unwrap();
        assert_eq!(store.roles_for(user).await.unwrap(), vec![Role::Owner]);

        store.revoke(user, Role::Admin).await.unwrap();
        store.revoke(user, Role::Owner).await.unwrap();
        assert!(store.roles_for(user).await.unwrap().is_empty());
        assert!(store.users_with_roles().await.unwrap().is_empty());
    }
}
