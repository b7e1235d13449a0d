use crate::utils::error::{GlowError, Result};
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, email_verification_token, user, user_role};
use super::types::{NewAccount, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        debug!("Finding user by ID: {}", user_id);

        Ok(entities::User::find_by_id(user_id).one(&self.db).await?)
    }

    /// Find user by normalized e-mail address
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by email");

        Ok(entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    /// Create an account with its e-mail verification token and initial
    /// roles; either all rows are written or none
    pub async fn register_user(&self, account: NewAccount<'_>) -> Result<user::Model> {
        debug!("Registering user");

        let txn = self.db.begin().await?;
        let taken = entities::User::find()
            .filter(user::Column::Email.eq(account.email))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(GlowError::conflict("e-mail already registered"));
        }

        let now = Utc::now();
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(account.email.to_string()),
            password_hash: Set(account.password_hash.to_string()),
            display_name: Set(account.display_name.to_string()),
            email_verified: Set(false),
            last_sign_in_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                GlowError::conflict("e-mail already registered")
            } else {
                GlowError::Database(e)
            }
        })?;

        email_verification_token::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            token_digest: Set(account.verification_digest.to_string()),
            expires_at: Set(account.verification_expires_at),
            created_at: Set(now),
            used_at: Set(None),
        }
        .insert(&txn)
        .await?;

        for role in account.roles {
            user_role::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.id),
                role: Set(role.as_str().to_string()),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(user)
    }

    /// Replace a user's password hash
    pub async fn update_user_password(&self, user_id: Uuid, password_hash: &str) -> Result<()> {
        debug!("Updating password for user: {}", user_id);

        let user = self.require_user(user_id).await?;
        let mut active_model: user::ActiveModel = user.into();
        active_model.password_hash = Set(password_hash.to_string());
        active_model.updated_at = Set(Utc::now());
        active_model.update(&self.db).await?;
        Ok(())
    }

    /// Mark a user's e-mail address as confirmed
    pub async fn mark_email_verified(&self, user_id: Uuid) -> Result<user::Model> {
        let user = self.require_user(user_id).await?;
        let mut active_model: user::ActiveModel = user.into();
        active_model.email_verified = Set(true);
        active_model.updated_at = Set(Utc::now());
        Ok(active_model.update(&self.db).await?)
    }

    /// Remember the time of the latest successful sign-in
    pub async fn record_sign_in(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let user = self.require_user(user_id).await?;
        let mut active_model: user::ActiveModel = user.into();
        active_model.last_sign_in_at = Set(Some(at));
        active_model.update(&self.db).await?;
        Ok(())
    }

    /// All users, oldest first
    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        Ok(entities::User::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn require_user(&self, user_id: Uuid) -> Result<user::Model> {
        self.find_user_by_id(user_id)
            .await?
            .ok_or_else(|| GlowError::not_found(format!("user {}", user_id)))
    }
}
