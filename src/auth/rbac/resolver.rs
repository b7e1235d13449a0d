//! Permission resolution against the role store

use crate::config::RbacConfig;
use crate::utils::error::Result;
use crate::utils::logging::SecurityLog;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::grants::granting_roles;
use super::store::RoleStore;
use super::types::{
    EffectivePermissions, PermissionCheck, PermissionKind, Resource, ResourceAccess, Role,
    RoleAssignment,
};

/// Answers "may this user do that" from the user's roles and the grant table
///
/// Roles are fetched from the store on every check unless a cache TTL is
/// configured. Role changes made through [`PermissionResolver::assign_role`]
/// and [`PermissionResolver::revoke_role`] drop the cached entry immediately.
#[derive(Clone)]
pub struct PermissionResolver {
    store: Arc<dyn RoleStore>,
    cache: Option<Cache<Uuid, Arc<Vec<Role>>>>,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver")
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl PermissionResolver {
    pub fn new(store: Arc<dyn RoleStore>, config: &RbacConfig) -> Self {
        let cache = (config.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });
        Self { store, cache }
    }

    /// Resolver without a cache
    pub fn uncached(store: Arc<dyn RoleStore>) -> Self {
        Self { store, cache: None }
    }

    /// Roles currently held by a user
    pub async fn get_user_roles(&self, user_id: Uuid) -> Result<Vec<Role>> {
        if let Some(cache) = &self.cache {
            if let Some(roles) = cache.get(&user_id).await {
                return Ok(roles.as_ref().clone());
            }
        }

        let roles = self.store.roles_for(user_id).await?;
        debug!("Resolved roles for {}: {:?}", user_id, roles);

        if let Some(cache) = &self.cache {
            cache.insert(user_id, Arc::new(roles.clone())).await;
        }
        Ok(roles)
    }

    pub async fn has_role(&self, user_id: Uuid, role: Role) -> Result<bool> {
        Ok(self.get_user_roles(user_id).await?.contains(&role))
    }

    /// Detailed permission check; a store failure is reported as a denial
    pub async fn check(
        &self,
        user_id: Uuid,
        resource: Resource,
        kind: PermissionKind,
    ) -> PermissionCheck {
        let roles = match self.get_user_roles(user_id).await {
            Ok(roles) => roles,
            Err(e) => {
                warn!("Role lookup failed for {}: {}", user_id, e);
                return PermissionCheck::denied("role lookup failed");
            }
        };

        if roles.is_empty() {
            return PermissionCheck::denied("user has no roles");
        }

        let granted_by = granting_roles(&roles, resource, kind);
        if granted_by.is_empty() {
            PermissionCheck::denied(format!("no held role grants {} on {}", kind, resource))
        } else {
            PermissionCheck {
                granted: true,
                granted_by,
                denial_reason: None,
            }
        }
    }

    /// Like [`check`](Self::check), recording denials in the security log
    pub async fn authorize(
        &self,
        user_id: Uuid,
        resource: Resource,
        kind: PermissionKind,
    ) -> PermissionCheck {
        let check = self.check(user_id, resource, kind).await;
        if !check.granted {
            SecurityLog::access_denied(
                user_id,
                &format!("{}:{}", resource, kind),
                check.denial_reason.as_deref().unwrap_or("denied"),
            );
        }
        check
    }

    pub async fn can_read(&self, user_id: Uuid, resource: Resource) -> bool {
        self.check(user_id, resource, PermissionKind::Read)
            .await
            .granted
    }

    pub async fn can_write(&self, user_id: Uuid, resource: Resource) -> bool {
        self.check(user_id, resource, PermissionKind::Write)
            .await
            .granted
    }

    pub async fn can_delete(&self, user_id: Uuid, resource: Resource) -> bool {
        self.check(user_id, resource, PermissionKind::Delete)
            .await
            .granted
    }

    /// Full resource matrix for a user
    pub async fn effective_permissions(&self, user_id: Uuid) -> Result<EffectivePermissions> {
        let roles = self.get_user_roles(user_id).await?;
        let resources = Resource::ALL
            .into_iter()
            .map(|resource| ResourceAccess {
                resource,
                read: !granting_roles(&roles, resource, PermissionKind::Read).is_empty(),
                write: !granting_roles(&roles, resource, PermissionKind::Write).is_empty(),
                delete: !granting_roles(&roles, resource, PermissionKind::Delete).is_empty(),
            })
            .collect();

        Ok(EffectivePermissions {
            user_id,
            roles,
            resources,
        })
    }

    pub async fn assign_role(&self, user_id: Uuid, role: Role) -> Result<()> {
        self.store.assign(user_id, role).await?;
        self.invalidate(user_id).await;
        Ok(())
    }

    pub async fn revoke_role(&self, user_id: Uuid, role: Role) -> Result<()> {
        self.store.revoke(user_id, role).await?;
        self.invalidate(user_id).await;
        Ok(())
    }

    pub async fn assignments(&self) -> Result<Vec<RoleAssignment>> {
        self.store.users_with_roles().await
    }

    /// Forget cached roles of a user
    pub async fn invalidate(&self, user_id: Uuid) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&user_id).await;
        }
    }
}
