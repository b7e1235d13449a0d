//! Online booking followed by cancellation through the mailed link

#[cfg(test)]
mod tests {
    use crate::common::TestApp;
    use chrono::{DateTime, Duration, NaiveTime, Utc};
    use glowdesk::core::models::AppointmentStatus;
    use glowdesk::salon::{BookingRequest, TokenStatus};
    use glowdesk::utils::GlowError;

    fn next_week_at(hour: u32) -> DateTime<Utc> {
        (Utc::now() + Duration::days(7))
            .date_naive()
            .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
            .and_utc()
    }

    fn request(starts_at: DateTime<Utc>) -> BookingRequest {
        BookingRequest {
            full_name: "Marta Souza".to_string(),
            email: "marta@example.com".to_string(),
            phone: Some("+55 11 91234-5678".to_string()),
            service: "Spa pedicure".to_string(),
            starts_at,
            duration_minutes: Some(90),
            employee_id: None,
            notes: None,
        }
    }

    fn token_from_link(link: &str) -> &str {
        link.rsplit('/').next().unwrap()
    }

    #[tokio::test]
    async fn test_cancel_with_mailed_link_at_threshold() {
        let app = TestApp::new().await;
        let confirmation = app.booking.book(request(next_week_at(13))).await.unwrap();

        let link = app.mailer.last_link_to("marta@example.com").unwrap();
        let token = token_from_link(&link);
        assert_eq!(token, confirmation.cancellation_token);

        let now = confirmation.starts_at - Duration::hours(6);
        let receipt = app
            .cancellation
            .cancel_at(token, Some("Schedule clash".to_string()), now)
            .await
            .unwrap();
        assert!(!receipt.is_late_cancellation);

        let stored = app
            .db
            .find_appointment(confirmation.appointment_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, AppointmentStatus::Cancelled);
        assert!(!stored.is_late_cancellation);
    }

    #[tokio::test]
    async fn test_cancel_inside_threshold_is_late() {
        let app = TestApp::new().await;
        let confirmation = app.booking.book(request(next_week_at(15))).await.unwrap();

        let now = confirmation.starts_at - Duration::hours(6) + Duration::minutes(1);
        match app
            .cancellation
            .lookup_at(&confirmation.cancellation_token, now)
            .await
            .unwrap()
        {
            TokenStatus::Valid(details) => assert!(details.late_if_cancelled_now),
            other => panic!("expected a valid link, got {:?}", other),
        }

        let receipt = app
            .cancellation
            .cancel_at(&confirmation.cancellation_token, None, now)
            .await
            .unwrap();
        assert!(receipt.is_late_cancellation);

        let err = app
            .cancellation
            .cancel_at(&confirmation.cancellation_token, None, now)
            .await
            .unwrap_err();
        assert!(matches!(err, GlowError::Gone(_)));
    }

    #[tokio::test]
    async fn test_cancelled_slot_can_be_booked_again() {
        let app = TestApp::new().await;
        let starts_at = next_week_at(10);
        let first = app.booking.book(request(starts_at)).await.unwrap();
        assert!(matches!(
            app.booking.book(request(starts_at)).await,
            Err(GlowError::Conflict(_))
        ));

        app.cancellation
            .cancel(&first.cancellation_token, None)
            .await
            .unwrap();
        let second = app.booking.book(request(starts_at)).await.unwrap();
        assert_eq!(second.customer_id, first.customer_id);
        assert_ne!(second.appointment_id, first.appointment_id);
    }

    #[tokio::test]
    async fn test_late_threshold_follows_configuration() {
        let mut config = glowdesk::config::Config::default();
        config.salon.late_cancellation_hours = 24;
        let app = TestApp::with_config(config).await;
        let confirmation = app.booking.book(request(next_week_at(11))).await.unwrap();

        let receipt = app
            .cancellation
            .cancel_at(
                &confirmation.cancellation_token,
                None,
                confirmation.starts_at - Duration::hours(12),
            )
            .await
            .unwrap();
        assert!(receipt.is_late_cancellation);
    }
}
