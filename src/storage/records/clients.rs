use crate::auth::rbac::Resource;
use crate::core::models::AppointmentStatus;
use crate::storage::database::entities::{self, appointment, customer};
use crate::storage::repository::{RecordFilter, SalonRecord};
use crate::utils::error::{GlowError, Result};
use crate::utils::validation::{normalize_email, require};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, Condition, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{clean, non_negative};

/// Customer form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub loyalty_points: i32,
}

impl CustomerInput {
    pub fn named<S: Into<String>>(full_name: S) -> Self {
        Self {
            full_name: full_name.into(),
            email: None,
            phone: None,
            birthday: None,
            notes: None,
            loyalty_points: 0,
        }
    }
}

fn customer_email(email: Option<String>) -> Option<String> {
    clean(email).map(|e| e.to_lowercase())
}

impl SalonRecord for customer::Model {
    type Entity = entities::Customer;
    type Active = customer::ActiveModel;
    type Input = CustomerInput;

    const RESOURCE: Resource = Resource::Customers;
    const NAME: &'static str = "customer";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> customer::Column {
        customer::Column::Id
    }

    fn sort_column() -> customer::Column {
        customer::Column::FullName
    }

    fn validate(input: &CustomerInput) -> Result<()> {
        require("full name", &input.full_name)?;
        if let Some(email) = clean(input.email.clone()) {
            normalize_email(&email)?;
        }
        if input.loyalty_points < 0 {
            return Err(GlowError::validation("loyalty points cannot be negative"));
        }
        Ok(())
    }

    fn new_active(input: CustomerInput, id: Uuid, now: DateTime<Utc>) -> customer::ActiveModel {
        customer::ActiveModel {
            id: Set(id),
            full_name: Set(input.full_name.trim().to_string()),
            email: Set(customer_email(input.email)),
            phone: Set(clean(input.phone)),
            birthday: Set(input.birthday),
            notes: Set(clean(input.notes)),
            loyalty_points: Set(input.loyalty_points),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut customer::ActiveModel, input: CustomerInput, now: DateTime<Utc>) {
        active.full_name = Set(input.full_name.trim().to_string());
        active.email = Set(customer_email(input.email));
        active.phone = Set(clean(input.phone));
        active.birthday = Set(input.birthday);
        active.notes = Set(clean(input.notes));
        active.loyalty_points = Set(input.loyalty_points);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use customer::Column;
        filter.text_condition(&[Column::FullName, Column::Email, Column::Phone, Column::Notes])
    }
}

/// Appointment form used by the scheduling screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentInput {
    pub customer_id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub service: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "scheduled")]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

fn scheduled() -> AppointmentStatus {
    AppointmentStatus::Scheduled
}

impl SalonRecord for appointment::Model {
    type Entity = entities::Appointment;
    type Active = appointment::ActiveModel;
    type Input = AppointmentInput;

    const RESOURCE: Resource = Resource::Appointments;
    const NAME: &'static str = "appointment";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> appointment::Column {
        appointment::Column::Id
    }

    fn sort_column() -> appointment::Column {
        appointment::Column::StartsAt
    }

    fn validate(input: &AppointmentInput) -> Result<()> {
        require("service", &input.service)?;
        if input.ends_at <= input.starts_at {
            return Err(GlowError::validation("the appointment must end after it starts"));
        }
        if let Some(price) = input.price {
            non_negative("price", price)?;
        }
        Ok(())
    }

    fn new_active(
        input: AppointmentInput,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> appointment::ActiveModel {
        let cancelled = input.status == AppointmentStatus::Cancelled;
        appointment::ActiveModel {
            id: Set(id),
            customer_id: Set(input.customer_id),
            employee_id: Set(input.employee_id),
            service: Set(input.service.trim().to_string()),
            starts_at: Set(input.starts_at),
            ends_at: Set(input.ends_at),
            price: Set(input.price),
            status: Set(input.status),
            notes: Set(clean(input.notes)),
            is_late_cancellation: Set(false),
            cancellation_reason: Set(None),
            cancelled_at: Set(cancelled.then_some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut appointment::ActiveModel, input: AppointmentInput, now: DateTime<Utc>) {
        let was_cancelled = match &active.cancelled_at {
            ActiveValue::Set(at) | ActiveValue::Unchanged(at) => at.is_some(),
            ActiveValue::NotSet => false,
        };
        match input.status {
            AppointmentStatus::Cancelled if !was_cancelled => {
                active.cancelled_at = Set(Some(now));
            }
            AppointmentStatus::Cancelled => {}
            _ => {
                active.cancelled_at = Set(None);
                active.cancellation_reason = Set(None);
                active.is_late_cancellation = Set(false);
            }
        }

        active.customer_id = Set(input.customer_id);
        active.employee_id = Set(input.employee_id);
        active.service = Set(input.service.trim().to_string());
        active.starts_at = Set(input.starts_at);
        active.ends_at = Set(input.ends_at);
        active.price = Set(input.price);
        active.status = Set(input.status);
        active.notes = Set(clean(input.notes));
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use appointment::Column;
        filter
            .text_condition(&[Column::Service, Column::Notes])
            .add(filter.status_condition(Column::Status))
            .add(filter.instant_condition(Column::StartsAt))
    }
}
