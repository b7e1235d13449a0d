use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, email_verification_token, password_reset_token};
use super::types::{LinkPurpose, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Store a single-use link token, replacing earlier ones of the same user
    pub async fn store_link_token(
        &self,
        purpose: LinkPurpose,
        user_id: Uuid,
        token_digest: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        debug!("Storing {:?} token for user: {}", purpose, user_id);
        let now = Utc::now();

        match purpose {
            LinkPurpose::PasswordReset => {
                entities::PasswordResetToken::delete_many()
                    .filter(password_reset_token::Column::UserId.eq(user_id))
                    .exec(&self.db)
                    .await?;

                password_reset_token::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    token_digest: Set(token_digest.to_string()),
                    expires_at: Set(expires_at),
                    created_at: Set(now),
                    used_at: Set(None),
                }
                .insert(&self.db)
                .await?;
            }
            LinkPurpose::EmailVerification => {
                entities::EmailVerificationToken::delete_many()
                    .filter(email_verification_token::Column::UserId.eq(user_id))
                    .exec(&self.db)
                    .await?;

                email_verification_token::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    token_digest: Set(token_digest.to_string()),
                    expires_at: Set(expires_at),
                    created_at: Set(now),
                    used_at: Set(None),
                }
                .insert(&self.db)
                .await?;
            }
        }

        Ok(())
    }

    /// Verify and consume a link token, returning the owning user
    ///
    /// Unknown, expired and already used tokens all yield `None`.
    pub async fn consume_link_token(
        &self,
        purpose: LinkPurpose,
        token_digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>> {
        debug!("Consuming {:?} token", purpose);

        match purpose {
            LinkPurpose::PasswordReset => {
                let token = entities::PasswordResetToken::find()
                    .filter(password_reset_token::Column::TokenDigest.eq(token_digest))
                    .one(&self.db)
                    .await?;

                match token {
                    Some(token) if token.used_at.is_none() && token.expires_at > now => {
                        let user_id = token.user_id;
                        let mut active_model: password_reset_token::ActiveModel = token.into();
                        active_model.used_at = Set(Some(now));
                        active_model.update(&self.db).await?;
                        Ok(Some(user_id))
                    }
                    _ => Ok(None),
                }
            }
            LinkPurpose::EmailVerification => {
                let token = entities::EmailVerificationToken::find()
                    .filter(email_verification_token::Column::TokenDigest.eq(token_digest))
                    .one(&self.db)
                    .await?;

                match token {
                    Some(token) if token.used_at.is_none() && token.expires_at > now => {
                        let user_id = token.user_id;
                        let mut active_model: email_verification_token::ActiveModel =
                            token.into();
                        active_model.used_at = Set(Some(now));
                        active_model.update(&self.db).await?;
                        Ok(Some(user_id))
                    }
                    _ => Ok(None),
                }
            }
        }
    }
}
