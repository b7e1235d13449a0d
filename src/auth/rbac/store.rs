//! Role assignment storage

use super::types::{Role, RoleAssignment};
use crate::utils::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Where user to role assignments live
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Roles currently held by a user (empty when none)
    async fn roles_for(&self, user_id: Uuid) -> Result<Vec<Role>>;

    /// Grant a role; granting a held role is a no-op
    async fn assign(&self, user_id: Uuid, role: Role) -> Result<()>;

    /// Withdraw a role; withdrawing a role that is not held is a no-op
    async fn revoke(&self, user_id: Uuid, role: Role) -> Result<()>;

    /// Every user holding at least one role
    async fn users_with_roles(&self) -> Result<Vec<RoleAssignment>>;
}

/// Process-local role store
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    assignments: RwLock<HashMap<Uuid, BTreeSet<Role>>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn roles_for(&self, user_id: Uuid) -> Result<Vec<Role>> {
        Ok(self
            .assignments
            .read()
            .get(&user_id)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn assign(&self, user_id: Uuid, role: Role) -> Result<()> {
        self.assignments
            .write()
            .entry(user_id)
            .or_default()
            .insert(role);
        Ok(())
    }

    async fn revoke(&self, user_id: Uuid, role: Role) -> Result<()> {
        let mut assignments = self.assignments.write();
        if let Some(roles) = assignments.get_mut(&user_id) {
            roles.remove(&role);
            if roles.is_empty() {
                assignments.remove(&user_id);
            }
        }
        Ok(())
    }

    async fn users_with_roles(&self) -> Result<Vec<RoleAssignment>> {
        Ok(self
            .assignments
            .read()
            .iter()
            .map(|(user_id, roles)| RoleAssignment {
                user_id: *user_id,
                roles: roles.iter().copied().collect(),
            })
            .collect())
    }
}
