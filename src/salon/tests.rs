//! Tests for booking and link cancellation

#[cfg(test)]
mod tests {
    use crate::auth::OutboxMailer;
    use crate::config::{Config, DatabaseConfig};
    use crate::core::models::AppointmentStatus;
    use crate::salon::{
        BookingRequest, BookingService, CancellationPolicy, CancellationService, TokenStatus,
    };
    use crate::storage::database::Database;
    use crate::storage::database::entities::{appointment, customer};
    use crate::storage::records::{AppointmentInput, CustomerInput};
    use crate::storage::{RecordFilter, RecordRepository};
    use crate::utils::error::GlowError;
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
    use std::sync::Arc;
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::connect_and_migrate(&DatabaseConfig::in_memory())
            .await
            .unwrap()
    }

    async fn appointment_at(db: &Database, starts_at: DateTime<Utc>) -> appointment::Model {
        let customer = RecordRepository::<customer::Model>::new(db.clone())
            .insert(CustomerInput::named("Fernanda"))
            .await
            .unwrap();
        RecordRepository::<appointment::Model>::new(db.clone())
            .insert(AppointmentInput {
                customer_id: customer.id,
                employee_id: None,
                service: "Manicure".to_string(),
                starts_at,
                ends_at: starts_at + Duration::hours(1),
                price: Some(45.0),
                status: AppointmentStatus::Scheduled,
                notes: None,
            })
            .await
            .unwrap()
    }

    fn tomorrow_at(hour: u32) -> DateTime<Utc> {
        let day = (Utc::now() + Duration::days(1)).date_naive();
        day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
            .and_utc()
    }

    fn booking(db: &Database, mailer: Arc<OutboxMailer>) -> BookingService {
        let cancellation = CancellationService::new(db.clone(), CancellationPolicy::default());
        BookingService::new(db.clone(), cancellation, &Config::default(), mailer)
    }

    fn request(email: &str, starts_at: DateTime<Utc>) -> BookingRequest {
        BookingRequest {
            full_name: "Gabriela Nunes".to_string(),
            email: email.to_string(),
            phone: None,
            service: "Gel nails".to_string(),
            starts_at,
            duration_minutes: None,
            employee_id: None,
            notes: None,
        }
    }

    #[test]
    fn test_late_threshold_boundary() {
        let policy = CancellationPolicy::default();
        let start = Utc::now() + Duration::days(2);

        assert!(!policy.is_late(start - Duration::hours(6), start));
        assert!(!policy.is_late(start - Duration::hours(30), start));
        assert!(policy.is_late(start - Duration::hours(6) + Duration::seconds(1), start));
        assert!(policy.is_late(start - Duration::minutes(5), start));
    }

    #[tokio::test]
    async fn test_cancel_exactly_six_hours_before_is_not_late() {
        let db = test_db().await;
        let appointment = appointment_at(&db, Utc::now() + Duration::days(1)).await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let token = service.issue_token(appointment.id).await.unwrap();

        let now = appointment.starts_at - Duration::hours(6);
        let receipt = service
            .cancel_at(&token, Some("  Travelling  ".to_string()), now)
            .await
            .unwrap();
        assert!(!receipt.is_late_cancellation);

        let stored = db.find_appointment(appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AppointmentStatus::Cancelled);
        assert!(!stored.is_late_cancellation);
        assert_eq!(stored.cancellation_reason.as_deref(), Some("Travelling"));
        assert!(stored.cancelled_at.is_some());
    }

    #[tokio::test]
    async fn test_cancel_inside_six_hours_is_late() {
        let db = test_db().await;
        let appointment = appointment_at(&db, Utc::now() + Duration::days(1)).await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let token = service.issue_token(appointment.id).await.unwrap();

        let now = appointment.starts_at - Duration::hours(5) - Duration::minutes(59);
        let receipt = service.cancel_at(&token, None, now).await.unwrap();
        assert!(receipt.is_late_cancellation);

        let stored = db.find_appointment(appointment.id).await.unwrap().unwrap();
        assert!(stored.is_late_cancellation);
    }

    #[tokio::test]
    async fn test_lookup_reports_details_then_used() {
        let db = test_db().await;
        let appointment = appointment_at(&db, Utc::now() + Duration::hours(3)).await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let token = service.issue_token(appointment.id).await.unwrap();

        match service.lookup(&token).await.unwrap() {
            TokenStatus::Valid(details) => {
                assert_eq!(details.appointment_id, appointment.id);
                assert_eq!(details.customer_name.as_deref(), Some("Fernanda"));
                assert_eq!(details.service, "Manicure");
                assert!(details.late_if_cancelled_now);
            }
            other => panic!("expected a valid link, got {:?}", other),
        }

        service.cancel(&token, None).await.unwrap();
        assert_eq!(service.lookup(&token).await.unwrap(), TokenStatus::Used);

        let err = service.cancel(&token, None).await.unwrap_err();
        assert!(matches!(err, GlowError::Gone(_)));
    }

    #[tokio::test]
    async fn test_link_expires_at_start() {
        let db = test_db().await;
        let appointment = appointment_at(&db, Utc::now() + Duration::days(1)).await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let token = service.issue_token(appointment.id).await.unwrap();

        let status = service
            .lookup_at(&token, appointment.starts_at)
            .await
            .unwrap();
        assert_eq!(status, TokenStatus::Expired);

        let err = service
            .cancel_at(&token, None, appointment.starts_at + Duration::minutes(1))
            .await
            .unwrap_err();
        assert!(matches!(err, GlowError::Gone(_)));
    }

    fn moved(appointment: &appointment::Model, starts_at: DateTime<Utc>) -> AppointmentInput {
        AppointmentInput {
            customer_id: appointment.customer_id,
            employee_id: appointment.employee_id,
            service: appointment.service.clone(),
            starts_at,
            ends_at: starts_at + Duration::hours(1),
            price: appointment.price,
            status: appointment.status,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_link_follows_earlier_reschedule() {
        let db = test_db().await;
        let appointment = appointment_at(&db, Utc::now() + Duration::days(2)).await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let token = service.issue_token(appointment.id).await.unwrap();

        let new_start = Utc::now() + Duration::hours(3);
        RecordRepository::<appointment::Model>::new(db.clone())
            .update(appointment.id, moved(&appointment, new_start))
            .await
            .unwrap();

        let after_start = new_start + Duration::hours(2);
        assert_eq!(
            service.lookup_at(&token, after_start).await.unwrap(),
            TokenStatus::Expired
        );
        let err = service.cancel_at(&token, None, after_start).await.unwrap_err();
        assert!(matches!(err, GlowError::Gone(_)));

        let stored = db.find_appointment(appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_link_follows_later_reschedule() {
        let db = test_db().await;
        let appointment = appointment_at(&db, Utc::now() + Duration::hours(4)).await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let token = service.issue_token(appointment.id).await.unwrap();

        let new_start = appointment.starts_at + Duration::days(1);
        RecordRepository::<appointment::Model>::new(db.clone())
            .update(appointment.id, moved(&appointment, new_start))
            .await
            .unwrap();

        let past_old_start = appointment.starts_at + Duration::hours(1);
        assert!(service.lookup_at(&token, past_old_start).await.unwrap().is_valid());
        let receipt = service.cancel_at(&token, None, past_old_start).await.unwrap();
        assert!(!receipt.is_late_cancellation);
    }

    #[tokio::test]
    async fn test_appointment_cancelled_by_staff() {
        let db = test_db().await;
        let appointment = appointment_at(&db, Utc::now() + Duration::days(1)).await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let token = service.issue_token(appointment.id).await.unwrap();

        RecordRepository::<appointment::Model>::new(db.clone())
            .update(
                appointment.id,
                AppointmentInput {
                    customer_id: appointment.customer_id,
                    employee_id: None,
                    service: appointment.service.clone(),
                    starts_at: appointment.starts_at,
                    ends_at: appointment.ends_at,
                    price: appointment.price,
                    status: AppointmentStatus::Cancelled,
                    notes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(
            service.lookup(&token).await.unwrap(),
            TokenStatus::AlreadyCancelled
        );
        let err = service.cancel(&token, None).await.unwrap_err();
        assert!(matches!(err, GlowError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_link() {
        let db = test_db().await;
        let service = CancellationService::new(db, CancellationPolicy::default());

        assert_eq!(service.lookup("deadbeef").await.unwrap(), TokenStatus::NotFound);
        assert_eq!(service.lookup("  ").await.unwrap(), TokenStatus::NotFound);
        let err = service.cancel("deadbeef", None).await.unwrap_err();
        assert!(matches!(err, GlowError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cannot_issue_link_for_cancelled_appointment() {
        let db = test_db().await;
        let service = CancellationService::new(db.clone(), CancellationPolicy::default());
        let err = service.issue_token(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, GlowError::NotFound(_)));

        let appointment = appointment_at(&db, Utc::now() + Duration::days(1)).await;
        let token = service.issue_token(appointment.id).await.unwrap();
        service.cancel(&token, None).await.unwrap();
        let err = service.issue_token(appointment.id).await.unwrap_err();
        assert!(matches!(err, GlowError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_booking_creates_customer_and_sends_link() {
        let db = test_db().await;
        let mailer = Arc::new(OutboxMailer::new());
        let service = booking(&db, mailer.clone());

        let confirmation = service
            .book(request("Gabi@Example.com", tomorrow_at(10)))
            .await
            .unwrap();
        assert_eq!(confirmation.ends_at - confirmation.starts_at, Duration::hours(1));
        assert_eq!(
            confirmation.cancel_path,
            format!("/cancel/{}", confirmation.cancellation_token)
        );

        let link = mailer.last_link_to("gabi@example.com").unwrap();
        assert!(link.ends_with(&confirmation.cancel_path));

        // Same customer on the second booking
        let second = service
            .book(request("gabi@example.com", tomorrow_at(14)))
            .await
            .unwrap();
        assert_eq!(second.customer_id, confirmation.customer_id);
        let customers = RecordRepository::<customer::Model>::new(db.clone())
            .list(&RecordFilter::default())
            .await
            .unwrap();
        assert_eq!(customers.len(), 1);
    }

    #[tokio::test]
    async fn test_booking_rejects_taken_slot() {
        let db = test_db().await;
        let service = booking(&db, Arc::new(OutboxMailer::new()));
        service
            .book(request("ana@example.com", tomorrow_at(10)))
            .await
            .unwrap();

        let mut overlapping = request("bia@example.com", tomorrow_at(10) + Duration::minutes(30));
        overlapping.duration_minutes = Some(30);
        let err = service.book(overlapping).await.unwrap_err();
        assert!(matches!(err, GlowError::Conflict(_)));

        // Another employee is free at the same time
        let mut other = request("bia@example.com", tomorrow_at(10));
        other.employee_id = Some(Uuid::new_v4());
        assert!(service.book(other).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bookings_take_a_slot_once() {
        let db = test_db().await;
        let service = booking(&db, Arc::new(OutboxMailer::new()));

        let attempts: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .book(request(&format!("guest{}@example.com", i), tomorrow_at(10)))
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => assert!(matches!(err, GlowError::Conflict(_))),
            }
        }
        assert_eq!(accepted, 1);

        let day = tomorrow_at(0).date_naive();
        let filter = RecordFilter {
            from: Some(day),
            to: Some(day),
            ..RecordFilter::default()
        };
        let booked = RecordRepository::<appointment::Model>::new(db.clone())
            .list(&filter)
            .await
            .unwrap();
        assert_eq!(booked.len(), 1);
    }

    #[tokio::test]
    async fn test_booking_validation() {
        let db = test_db().await;
        let service = booking(&db, Arc::new(OutboxMailer::new()));

        let past = request("ana@example.com", Utc::now() - Duration::hours(1));
        assert!(matches!(service.book(past).await, Err(GlowError::Validation(_))));

        let late = request("ana@example.com", tomorrow_at(19));
        assert!(matches!(service.book(late).await, Err(GlowError::Validation(_))));

        let bad_email = request("not-an-email", tomorrow_at(10));
        assert!(matches!(service.book(bad_email).await, Err(GlowError::Validation(_))));

        let mut zero = request("ana@example.com", tomorrow_at(10));
        zero.duration_minutes = Some(0);
        assert!(matches!(service.book(zero).await, Err(GlowError::Validation(_))));
    }

    #[tokio::test]
    async fn test_available_slots_skip_bookings() {
        let db = test_db().await;
        let service = booking(&db, Arc::new(OutboxMailer::new()));
        let day: NaiveDate = tomorrow_at(0).date_naive();

        let free = service.available_slots(day, None).await.unwrap();
        assert_eq!(free.len(), 19);
        assert_eq!(free[0].starts_at, tomorrow_at(9));
        assert_eq!(free.last().unwrap().ends_at, tomorrow_at(19));

        service
            .book(request("ana@example.com", tomorrow_at(10)))
            .await
            .unwrap();
        let free = service.available_slots(day, None).await.unwrap();
        assert_eq!(free.len(), 16);
        assert!(free.iter().any(|s| s.starts_at == tomorrow_at(9)));
        assert!(!free.iter().any(|s| s.starts_at == tomorrow_at(10)));
        assert!(free.iter().any(|s| s.starts_at == tomorrow_at(11)));
    }
}
