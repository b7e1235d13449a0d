//! Online booking from the public page

use super::cancellation::CancellationService;
use crate::auth::{Mailer, OutgoingMail};
use crate::config::{Config, SalonConfig, ServerConfig};
use crate::core::models::AppointmentStatus;
use crate::storage::database::Database;
use crate::storage::database::entities::{appointment, customer};
use crate::storage::records::{AppointmentInput, CustomerInput};
use crate::storage::{RecordRepository, SalonRecord};
use crate::utils::error::{GlowError, Result};
use crate::utils::logging::mask_email;
use crate::utils::validation::{normalize_email, require};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// Booking form of the public page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub service: String,
    pub starts_at: DateTime<Utc>,
    /// Falls back to the salon's default duration
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// What the customer gets back after booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub appointment_id: Uuid,
    pub customer_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub cancellation_token: String,
    /// Dashboard path of the cancellation page
    pub cancel_path: String,
}

/// A free start on the booking grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Books appointments for customers who are not signed in
#[derive(Clone)]
pub struct BookingService {
    db: Database,
    cancellation: CancellationService,
    salon: SalonConfig,
    server: ServerConfig,
    mailer: Arc<dyn Mailer>,
    /// One lock per employee column value; bookings of the same calendar
    /// run one at a time
    calendars: Arc<DashMap<Option<Uuid>, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("salon", &self.salon.name)
            .finish()
    }
}

impl BookingService {
    pub fn new(
        db: Database,
        cancellation: CancellationService,
        config: &Config,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            db,
            cancellation,
            salon: config.salon.clone(),
            server: config.server.clone(),
            mailer,
            calendars: Arc::new(DashMap::new()),
        }
    }

    pub async fn book(&self, request: BookingRequest) -> Result<BookingConfirmation> {
        self.book_at(request, Utc::now()).await
    }

    /// Book as of `now`
    pub async fn book_at(
        &self,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<BookingConfirmation> {
        let full_name = require("name", &request.full_name)?;
        let email = normalize_email(&request.email)?;
        let service = require("service", &request.service)?;
        let minutes = request
            .duration_minutes
            .unwrap_or(self.salon.default_duration_minutes);
        if minutes == 0 {
            return Err(GlowError::validation("the duration must be positive"));
        }
        let starts_at = request.starts_at;
        let ends_at = starts_at + Duration::minutes(i64::from(minutes));
        if starts_at <= now {
            return Err(GlowError::validation("the appointment must be in the future"));
        }
        if !self.within_opening_hours(starts_at, ends_at) {
            return Err(GlowError::validation(format!(
                "the salon is open from {}:00 to {}:00",
                self.salon.opening_hour, self.salon.closing_hour
            )));
        }

        let calendar = self.calendar(request.employee_id);
        let _held = calendar.lock().await;

        let taken = self
            .db
            .scheduled_appointments_between(request.employee_id, starts_at, ends_at)
            .await?;
        if !taken.is_empty() {
            return Err(slot_taken());
        }

        let customer = self
            .find_or_create_customer(full_name, email, request.phone)
            .await?;
        let input = AppointmentInput {
            customer_id: customer.id,
            employee_id: request.employee_id,
            service,
            starts_at,
            ends_at,
            price: None,
            status: AppointmentStatus::Scheduled,
            notes: request.notes,
        };
        appointment::Model::validate(&input)?;
        let appointment = self
            .db
            .insert_appointment_if_free(
                appointment::Model::new_active(input, Uuid::new_v4(), Utc::now()),
                request.employee_id,
                starts_at,
                ends_at,
            )
            .await?
            .ok_or_else(slot_taken)?;
        let token = self.cancellation.issue_token(appointment.id).await?;
        let cancel_path = format!("/cancel/{}", token);

        info!(
            "Online booking {} for {} at {}",
            appointment.id,
            mask_email(customer.email.as_deref().unwrap_or_default()),
            starts_at
        );
        self.send_confirmation(&customer, &appointment, &cancel_path)
            .await;

        Ok(BookingConfirmation {
            appointment_id: appointment.id,
            customer_id: customer.id,
            starts_at,
            ends_at,
            cancellation_token: token,
            cancel_path,
        })
    }

    pub async fn available_slots(&self, day: NaiveDate, employee_id: Option<Uuid>) -> Result<Vec<Slot>> {
        self.available_slots_at(day, employee_id, Utc::now()).await
    }

    /// Free grid starts of `day` that are still in the future
    pub async fn available_slots_at(
        &self,
        day: NaiveDate,
        employee_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let (Some(opening), Some(closing)) = (
            NaiveTime::from_hms_opt(self.salon.opening_hour, 0, 0),
            NaiveTime::from_hms_opt(self.salon.closing_hour, 0, 0),
        ) else {
            return Ok(Vec::new());
        };
        let opening = day.and_time(opening).and_utc();
        let closing = day.and_time(closing).and_utc();
        let step = Duration::minutes(i64::from(self.salon.slot_minutes.max(1)));
        let length = Duration::minutes(i64::from(self.salon.default_duration_minutes.max(1)));

        let taken = self
            .db
            .scheduled_appointments_between(employee_id, opening, closing)
            .await?;

        let mut slots = Vec::new();
        let mut starts_at = opening;
        while starts_at + length <= closing {
            let ends_at = starts_at + length;
            if starts_at > now && !taken.iter().any(|a| a.overlaps(starts_at, ends_at)) {
                slots.push(Slot { starts_at, ends_at });
            }
            starts_at += step;
        }
        Ok(slots)
    }

    fn calendar(&self, employee_id: Option<Uuid>) -> Arc<Mutex<()>> {
        self.calendars.entry(employee_id).or_default().clone()
    }

    fn within_opening_hours(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        let closing = starts_at
            .date_naive()
            .and_hms_opt(self.salon.closing_hour, 0, 0)
            .map(|t| t.and_utc());
        starts_at.hour() >= self.salon.opening_hour && closing.is_some_and(|c| ends_at <= c)
    }

    async fn find_or_create_customer(
        &self,
        full_name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<customer::Model> {
        if let Some(existing) = self.db.find_customer_by_email(&email).await? {
            return Ok(existing);
        }
        RecordRepository::<customer::Model>::new(self.db.clone())
            .insert(CustomerInput {
                email: Some(email),
                phone,
                ..CustomerInput::named(full_name)
            })
            .await
    }

    async fn send_confirmation(
        &self,
        customer: &customer::Model,
        appointment: &appointment::Model,
        cancel_path: &str,
    ) {
        let Some(to) = customer.email.clone() else {
            return;
        };
        let link = self.server.link(cancel_path);
        let mail = OutgoingMail {
            to,
            subject: format!("{}: your appointment is booked", self.salon.name),
            body: format!(
                "Hi {}, your {} is booked for {}. To cancel, open {}",
                customer.full_name,
                appointment.service,
                appointment.starts_at.format("%Y-%m-%d %H:%M UTC"),
                link
            ),
            link: Some(link),
        };
        if let Err(e) = self.mailer.send(mail).await {
            warn!("Booking confirmation for {} not sent: {}", appointment.id, e);
        }
    }
}

fn slot_taken() -> GlowError {
    GlowError::conflict("the selected time is no longer available")
}
