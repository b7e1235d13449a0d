use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loyalty promotion code
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Uppercased redemption code (unique)
    #[sea_orm(unique)]
    pub code: String,
    pub description: Option<String>,
    pub discount_percent: i32,
    pub valid_from: Option<Date>,
    pub valid_until: Option<Date>,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Active and inside its validity window on `day`
    pub fn is_redeemable_on(&self, day: Date) -> bool {
        self.active
            && self.valid_from.is_none_or(|from| from <= day)
            && self.valid_until.is_none_or(|until| day <= until)
    }
}
