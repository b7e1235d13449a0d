use crate::core::models::AppointmentStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booked service for a customer
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Staff member performing the service
    pub employee_id: Option<Uuid>,
    pub service: String,
    pub starts_at: DateTimeUtc,
    pub ends_at: DateTimeUtc,
    pub price: Option<f64>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub is_late_cancellation: bool,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,

    #[sea_orm(has_many = "super::cancellation_token::Entity")]
    CancellationTokens,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::cancellation_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CancellationTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this appointment occupies part of `[from, to)`
    pub fn overlaps(&self, from: DateTimeUtc, to: DateTimeUtc) -> bool {
        self.status == AppointmentStatus::Scheduled && self.starts_at < to && from < self.ends_at
    }
}
