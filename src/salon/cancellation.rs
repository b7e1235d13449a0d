//! Appointment cancellation through a link sent to the customer

use crate::config::SalonConfig;
use crate::core::models::AppointmentStatus;
use crate::storage::database::entities::{appointment, cancellation_token, customer};
use crate::storage::database::{CancellationRecord, Database};
use crate::storage::RecordRepository;
use crate::utils::crypto::{generate_token, token_digest};
use crate::utils::error::{GlowError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

const TOKEN_BYTES: usize = 32;
const MAX_REASON_LEN: usize = 500;

/// When a cancellation counts as late
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPolicy {
    pub late_threshold: Duration,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            late_threshold: Duration::hours(6),
        }
    }
}

impl CancellationPolicy {
    pub fn from_config(config: &SalonConfig) -> Self {
        Self {
            late_threshold: Duration::hours(i64::from(config.late_cancellation_hours)),
        }
    }

    /// Late when strictly less than the threshold remains before the start
    pub fn is_late(&self, now: DateTime<Utc>, starts_at: DateTime<Utc>) -> bool {
        starts_at - now < self.late_threshold
    }
}

/// What the cancellation page shows for a valid link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentDetails {
    pub appointment_id: Uuid,
    pub customer_name: Option<String>,
    pub service: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Whether cancelling right now would be recorded as late
    pub late_if_cancelled_now: bool,
}

/// State of a cancellation link
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TokenStatus {
    Valid(AppointmentDetails),
    /// The appointment has started (or is otherwise over)
    Expired,
    /// This link already cancelled the appointment
    Used,
    /// The salon cancelled the appointment some other way
    AlreadyCancelled,
    NotFound,
}

impl TokenStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid(_))
    }

    /// Error reported when cancelling with a link in this state
    fn into_error(self) -> GlowError {
        match self {
            TokenStatus::NotFound => GlowError::not_found("cancellation link not found"),
            TokenStatus::Expired => GlowError::gone("cancellation link has expired"),
            TokenStatus::Used => GlowError::gone("cancellation link was already used"),
            TokenStatus::AlreadyCancelled => {
                GlowError::conflict("appointment is already cancelled")
            }
            TokenStatus::Valid(_) => GlowError::internal("valid link reported as failure"),
        }
    }
}

/// Result of a successful cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationReceipt {
    pub appointment_id: Uuid,
    pub cancelled_at: DateTime<Utc>,
    pub is_late_cancellation: bool,
}

/// Issues, inspects and redeems cancellation links
#[derive(Debug, Clone)]
pub struct CancellationService {
    db: Database,
    policy: CancellationPolicy,
}

impl CancellationService {
    pub fn new(db: Database, policy: CancellationPolicy) -> Self {
        Self { db, policy }
    }

    /// Create a link token for a scheduled appointment
    ///
    /// Only the token's digest is stored; the link stays usable until the
    /// appointment starts, wherever it is moved to.
    pub async fn issue_token(&self, appointment_id: Uuid) -> Result<String> {
        let appointment = self
            .db
            .find_appointment(appointment_id)
            .await?
            .ok_or_else(|| GlowError::not_found(format!("appointment {} not found", appointment_id)))?;
        if appointment.status != AppointmentStatus::Scheduled {
            return Err(GlowError::conflict(format!(
                "appointment is {}",
                appointment.status
            )));
        }

        let token = generate_token(TOKEN_BYTES);
        self.db
            .store_cancellation_token(appointment_id, &token_digest(&token), appointment.starts_at)
            .await?;
        debug!("Issued cancellation link for appointment {}", appointment_id);
        Ok(token)
    }

    pub async fn lookup(&self, token: &str) -> Result<TokenStatus> {
        self.lookup_at(token, Utc::now()).await
    }

    pub async fn lookup_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenStatus> {
        let Some((row, appointment)) = self.find(token).await? else {
            return Ok(TokenStatus::NotFound);
        };
        match Self::blocked(&row, &appointment, now) {
            Some(status) => Ok(status),
            None => Ok(TokenStatus::Valid(self.details(appointment, now).await?)),
        }
    }

    pub async fn cancel(&self, token: &str, reason: Option<String>) -> Result<CancellationReceipt> {
        self.cancel_at(token, reason, Utc::now()).await
    }

    /// Cancel the appointment behind `token`, recording whether it was late
    pub async fn cancel_at(
        &self,
        token: &str,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<CancellationReceipt> {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if reason.as_ref().is_some_and(|r| r.chars().count() > MAX_REASON_LEN) {
            return Err(GlowError::validation(format!(
                "the reason must be at most {} characters",
                MAX_REASON_LEN
            )));
        }

        let Some((row, appointment)) = self.find(token).await? else {
            return Err(TokenStatus::NotFound.into_error());
        };
        if let Some(status) = Self::blocked(&row, &appointment, now) {
            return Err(status.into_error());
        }

        let is_late = self.policy.is_late(now, appointment.starts_at);
        let updated = self
            .db
            .cancel_with_token(
                row,
                appointment,
                CancellationRecord {
                    reason,
                    is_late,
                    cancelled_at: now,
                },
            )
            .await?;
        info!(
            "Appointment {} cancelled by customer link (late: {})",
            updated.id, is_late
        );

        Ok(CancellationReceipt {
            appointment_id: updated.id,
            cancelled_at: now,
            is_late_cancellation: updated.is_late_cancellation,
        })
    }

    async fn find(
        &self,
        token: &str,
    ) -> Result<Option<(cancellation_token::Model, appointment::Model)>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self
            .db
            .find_cancellation_token(&token_digest(token))
            .await?
            .and_then(|(row, appointment)| appointment.map(|a| (row, a))))
    }

    /// Why a link can no longer be used, if it cannot; used wins over
    /// cancelled, which wins over expired
    ///
    /// Expiry follows the appointment's current start, so a link stays in
    /// step with rescheduling.
    fn blocked(
        row: &cancellation_token::Model,
        appointment: &appointment::Model,
        now: DateTime<Utc>,
    ) -> Option<TokenStatus> {
        if row.used_at.is_some() {
            Some(TokenStatus::Used)
        } else if appointment.status == AppointmentStatus::Cancelled {
            Some(TokenStatus::AlreadyCancelled)
        } else if appointment.status == AppointmentStatus::Completed || appointment.starts_at <= now {
            Some(TokenStatus::Expired)
        } else {
            None
        }
    }

    async fn details(
        &self,
        appointment: appointment::Model,
        now: DateTime<Utc>,
    ) -> Result<AppointmentDetails> {
        let customer = RecordRepository::<customer::Model>::new(self.db.clone())
            .find(appointment.customer_id)
            .await?;
        Ok(AppointmentDetails {
            appointment_id: appointment.id,
            customer_name: customer.map(|c| c.full_name),
            late_if_cancelled_now: self.policy.is_late(now, appointment.starts_at),
            service: appointment.service,
            starts_at: appointment.starts_at,
            ends_at: appointment.ends_at,
        })
    }
}
