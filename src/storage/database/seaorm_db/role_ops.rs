use crate::auth::rbac::{Role, RoleAssignment, RoleStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use uuid::Uuid;

use super::super::entities::{self, user_role};
use super::types::SeaOrmDatabase;

/// Parse stored role names, skipping rows written by something newer
fn parse_roles(rows: impl IntoIterator<Item = user_role::Model>) -> Vec<Role> {
    let mut roles: Vec<Role> = rows
        .into_iter()
        .filter_map(|row| match row.role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!("Ignoring role row {} of user {}: {}", row.id, row.user_id, e);
                None
            }
        })
        .collect();
    roles.sort();
    roles.dedup();
    roles
}

#[async_trait]
impl RoleStore for SeaOrmDatabase {
    async fn roles_for(&self, user_id: Uuid) -> Result<Vec<Role>> {
        let rows = entities::UserRole::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        Ok(parse_roles(rows))
    }

    async fn assign(&self, user_id: Uuid, role: Role) -> Result<()> {
        let existing = entities::UserRole::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::Role.eq(role.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        debug!("Assigning role {} to user {}", role, user_id);
        let active_model = user_role::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role: Set(role.as_str().to_string()),
            created_at: Set(Utc::now()),
        };

        match active_model.insert(&self.db).await {
            Ok(_) => Ok(()),
            // Lost a race against a concurrent identical assignment
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn revoke(&self, user_id: Uuid, role: Role) -> Result<()> {
        let result = entities::UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::Role.eq(role.as_str()))
            .exec(&self.db)
            .await?;
        debug!(
            "Revoked role {} from user {} ({} rows)",
            role, user_id, result.rows_affected
        );
        Ok(())
    }

    async fn users_with_roles(&self) -> Result<Vec<RoleAssignment>> {
        let rows = entities::UserRole::find()
            .order_by_asc(user_role::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut by_user: BTreeMap<Uuid, Vec<user_role::Model>> = BTreeMap::new();
        for row in rows {
            by_user.entry(row.user_id).or_default().push(row);
        }

        Ok(by_user
            .into_iter()
            .map(|(user_id, rows)| RoleAssignment {
                user_id,
                roles: parse_roles(rows),
            })
            .filter(|assignment| !assignment.roles.is_empty())
            .collect())
    }
}
