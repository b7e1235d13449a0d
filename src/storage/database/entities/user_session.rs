use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Server-side record of an issued session
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_sessions")]
pub struct Model {
    /// Session ID, also the `jti` of its access token
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    /// SHA-256 of the refresh token, absent for short sessions
    pub refresh_token_digest: Option<String>,

    pub remember_me: bool,

    pub expires_at: DateTimeUtc,

    pub created_at: DateTimeUtc,

    pub last_refreshed_at: Option<DateTimeUtc>,

    pub revoked_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Not revoked and not past its expiry
    pub fn is_live(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}
