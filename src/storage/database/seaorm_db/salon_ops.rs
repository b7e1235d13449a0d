use crate::core::models::AppointmentStatus;
use crate::utils::error::{GlowError, Result};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, appointment, cancellation_token, customer};
use super::types::SeaOrmDatabase;

/// What a cancellation writes onto the appointment
#[derive(Debug, Clone)]
pub struct CancellationRecord {
    pub reason: Option<String>,
    pub is_late: bool,
    pub cancelled_at: DateTime<Utc>,
}

impl SeaOrmDatabase {
    /// Customer whose stored e-mail matches, case-insensitively
    pub async fn find_customer_by_email(&self, email: &str) -> Result<Option<customer::Model>> {
        let email = email.trim().to_lowercase();
        Ok(entities::Customer::find()
            .filter(Expr::expr(Func::lower(Expr::col(customer::Column::Email))).eq(email))
            .order_by_asc(customer::Column::CreatedAt)
            .one(&self.db)
            .await?)
    }

    pub async fn find_appointment(&self, id: Uuid) -> Result<Option<appointment::Model>> {
        Ok(entities::Appointment::find_by_id(id).one(&self.db).await?)
    }

    /// Scheduled appointments of one employee (or of nobody) overlapping `[from, to)`
    pub async fn scheduled_appointments_between(
        &self,
        employee_id: Option<Uuid>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<appointment::Model>> {
        Self::overlapping(&self.db, employee_id, from, to).await
    }

    /// Insert a booked appointment unless the slot was taken meanwhile
    ///
    /// The overlap check and the insert share one transaction; `None` means
    /// the slot is no longer free.
    pub async fn insert_appointment_if_free(
        &self,
        active_model: appointment::ActiveModel,
        employee_id: Option<Uuid>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Option<appointment::Model>> {
        let txn = self.db.begin().await?;
        if !Self::overlapping(&txn, employee_id, from, to).await?.is_empty() {
            txn.rollback().await?;
            return Ok(None);
        }
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;
        Ok(Some(model))
    }

    async fn overlapping<C: ConnectionTrait>(
        conn: &C,
        employee_id: Option<Uuid>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<appointment::Model>> {
        let query = entities::Appointment::find()
            .filter(appointment::Column::Status.eq(AppointmentStatus::Scheduled))
            .filter(appointment::Column::StartsAt.lt(to))
            .filter(appointment::Column::EndsAt.gt(from));
        let query = match employee_id {
            Some(id) => query.filter(appointment::Column::EmployeeId.eq(id)),
            None => query.filter(appointment::Column::EmployeeId.is_null()),
        };

        Ok(query
            .order_by_asc(appointment::Column::StartsAt)
            .all(conn)
            .await?)
    }

    /// Persist the digest of a freshly issued cancellation token
    pub async fn store_cancellation_token(
        &self,
        appointment_id: Uuid,
        token_digest: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<cancellation_token::Model> {
        debug!("Storing cancellation token for appointment {}", appointment_id);

        let active_model = cancellation_token::ActiveModel {
            id: Set(Uuid::new_v4()),
            appointment_id: Set(appointment_id),
            token_digest: Set(token_digest.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
            used_at: Set(None),
        };
        Ok(active_model.insert(&self.db).await?)
    }

    /// Token row for a digest together with its appointment
    pub async fn find_cancellation_token(
        &self,
        token_digest: &str,
    ) -> Result<Option<(cancellation_token::Model, Option<appointment::Model>)>> {
        Ok(entities::CancellationToken::find()
            .filter(cancellation_token::Column::TokenDigest.eq(token_digest))
            .find_also_related(entities::Appointment)
            .one(&self.db)
            .await?)
    }

    /// Mark the token used and cancel its appointment in one transaction
    ///
    /// Fails with `Conflict` when the token was consumed concurrently.
    pub async fn cancel_with_token(
        &self,
        token: cancellation_token::Model,
        appointment: appointment::Model,
        record: CancellationRecord,
    ) -> Result<appointment::Model> {
        let txn = self.db.begin().await?;

        let claimed = entities::CancellationToken::update_many()
            .col_expr(
                cancellation_token::Column::UsedAt,
                Expr::value(record.cancelled_at),
            )
            .filter(cancellation_token::Column::Id.eq(token.id))
            .filter(cancellation_token::Column::UsedAt.is_null())
            .exec(&txn)
            .await?;
        if claimed.rows_affected == 0 {
            txn.rollback().await?;
            return Err(GlowError::conflict("cancellation link was already used"));
        }

        let mut active_model: appointment::ActiveModel = appointment.into();
        active_model.status = Set(AppointmentStatus::Cancelled);
        active_model.is_late_cancellation = Set(record.is_late);
        active_model.cancellation_reason = Set(record.reason);
        active_model.cancelled_at = Set(Some(record.cancelled_at));
        active_model.updated_at = Set(record.cancelled_at);
        let updated = active_model.update(&txn).await?;

        txn.commit().await?;
        debug!("Cancellation token {} redeemed", token.id);
        Ok(updated)
    }
}
