use crate::utils::error::{GlowError, Result};
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, user_session};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Persist a newly issued session
    pub async fn create_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        refresh_token_digest: Option<String>,
        remember_me: bool,
        expires_at: DateTime<Utc>,
    ) -> Result<user_session::Model> {
        debug!("Creating session {} for user {}", session_id, user_id);

        let active_model = user_session::ActiveModel {
            id: Set(session_id),
            user_id: Set(user_id),
            refresh_token_digest: Set(refresh_token_digest),
            remember_me: Set(remember_me),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
            last_refreshed_at: Set(None),
            revoked_at: Set(None),
        };

        Ok(active_model.insert(&self.db).await?)
    }

    pub async fn find_session(&self, session_id: Uuid) -> Result<Option<user_session::Model>> {
        Ok(entities::UserSession::find_by_id(session_id)
            .one(&self.db)
            .await?)
    }

    pub async fn find_session_by_refresh_digest(
        &self,
        digest: &str,
    ) -> Result<Option<user_session::Model>> {
        Ok(entities::UserSession::find()
            .filter(user_session::Column::RefreshTokenDigest.eq(digest))
            .one(&self.db)
            .await?)
    }

    /// Rotate the refresh token of a session and move its expiry
    pub async fn rotate_session(
        &self,
        session: user_session::Model,
        refresh_token_digest: String,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<user_session::Model> {
        let mut active_model: user_session::ActiveModel = session.into();
        active_model.refresh_token_digest = Set(Some(refresh_token_digest));
        active_model.expires_at = Set(expires_at);
        active_model.last_refreshed_at = Set(Some(now));
        Ok(active_model.update(&self.db).await?)
    }

    /// Revoke one session; revoking an unknown or revoked session is a no-op
    pub async fn revoke_session(&self, session_id: Uuid, now: DateTime<Utc>) -> Result<bool> {
        let Some(session) = self.find_session(session_id).await? else {
            return Ok(false);
        };
        if session.revoked_at.is_some() {
            return Ok(false);
        }

        let mut active_model: user_session::ActiveModel = session.into();
        active_model.revoked_at = Set(Some(now));
        active_model.update(&self.db).await?;
        debug!("Revoked session {}", session_id);
        Ok(true)
    }

    /// Revoke every live session of a user except `keep`
    pub async fn revoke_user_sessions(
        &self,
        user_id: Uuid,
        keep: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>> {
        let sessions = entities::UserSession::find()
            .filter(user_session::Column::UserId.eq(user_id))
            .filter(user_session::Column::RevokedAt.is_null())
            .all(&self.db)
            .await?;

        let mut revoked = Vec::new();
        for session in sessions {
            if Some(session.id) == keep {
                continue;
            }
            let id = session.id;
            let mut active_model: user_session::ActiveModel = session.into();
            active_model.revoked_at = Set(Some(now));
            active_model.update(&self.db).await?;
            revoked.push(id);
        }
        Ok(revoked)
    }

    /// Look up a session that must still be usable
    pub async fn require_live_session(
        &self,
        session_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<user_session::Model> {
        match self.find_session(session_id).await? {
            Some(session) if session.is_live(now) => Ok(session),
            _ => Err(GlowError::session("session expired or revoked")),
        }
    }

    /// Delete sessions that expired or were revoked before `before`
    pub async fn purge_sessions(&self, before: DateTime<Utc>) -> Result<u64> {
        let stale: Vec<Uuid> = entities::UserSession::find()
            .all(&self.db)
            .await?
            .into_iter()
            .filter(|s| s.expires_at < before || s.revoked_at.is_some_and(|r| r < before))
            .map(|s| s.id)
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        let result = entities::UserSession::delete_many()
            .filter(user_session::Column::Id.is_in(stale))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
