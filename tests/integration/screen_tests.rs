//! Record screens over a real database

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use chrono::{Duration, Utc};
    use glowdesk::core::models::AppointmentStatus;
    use glowdesk::screens::{DashboardSummary, ListScreen, ScreenState};
    use glowdesk::storage::database::entities::{appointment, customer, expense};
    use glowdesk::storage::records::{AppointmentInput, CustomerInput, ExpenseInput};
    use glowdesk::storage::{RecordFilter, RecordRepository};
    use glowdesk::utils::Notice;

    #[tokio::test]
    async fn test_customer_round_trip() {
        let test_db = TestDatabase::seeded().await;
        let mut screen: ListScreen<customer::Model> =
            ListScreen::new(RecordRepository::new(test_db.db().clone()));
        screen.mount().await;
        let before = screen.records().len();

        let input = CustomerInput {
            email: Some("luiza@example.com".to_string()),
            phone: Some("+55 21 98888-7777".to_string()),
            loyalty_points: 40,
            ..CustomerInput::named("Luiza Campos")
        };
        let created = screen.create(input).await.unwrap();

        assert_eq!(screen.records().len(), before + 1);
        let matches: Vec<_> = screen
            .records()
            .iter()
            .filter(|c| c.full_name == "Luiza Campos")
            .collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, created.id);
        assert_eq!(matches[0].email.as_deref(), Some("luiza@example.com"));
        assert_eq!(matches[0].phone.as_deref(), Some("+55 21 98888-7777"));
        assert_eq!(matches[0].loyalty_points, 40);
    }

    #[tokio::test]
    async fn test_appointment_screen_rejects_inverted_times() {
        let test_db = TestDatabase::seeded().await;
        let customer = RecordRepository::<customer::Model>::new(test_db.db().clone())
            .list(&RecordFilter::default())
            .await
            .unwrap()
            .remove(0);
        let mut screen: ListScreen<appointment::Model> =
            ListScreen::new(RecordRepository::new(test_db.db().clone()));

        let starts_at = Utc::now() + Duration::days(3);
        let created = screen
            .create(AppointmentInput {
                customer_id: customer.id,
                employee_id: None,
                service: "Nail art".to_string(),
                starts_at,
                ends_at: starts_at - Duration::minutes(30),
                price: Some(80.0),
                status: AppointmentStatus::Scheduled,
                notes: None,
            })
            .await;
        assert!(created.is_none());
        assert!(matches!(screen.take_notice(), Some(Notice::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_expense_filter_by_date_window() {
        let test_db = TestDatabase::new().await;
        let mut screen: ListScreen<expense::Model> =
            ListScreen::new(RecordRepository::new(test_db.db().clone()));
        let today = Utc::now().date_naive();

        for (description, days_ago) in [("Gel polish restock", 2), ("Rent", 40)] {
            screen
                .create(ExpenseInput {
                    description: description.to_string(),
                    category: "supplies".to_string(),
                    amount: 120.0,
                    spent_on: today - Duration::days(days_ago),
                })
                .await
                .unwrap();
        }

        screen
            .load(RecordFilter {
                from: Some(today - Duration::days(7)),
                to: Some(today),
                ..RecordFilter::default()
            })
            .await;
        assert!(matches!(screen.state(), ScreenState::Ready(rows) if rows.len() == 1));
        assert_eq!(screen.records()[0].description, "Gel polish restock");
    }

    #[tokio::test]
    async fn test_dashboard_counts_todays_schedule() {
        let test_db = TestDatabase::seeded().await;
        let tomorrow = (Utc::now() + Duration::days(1)).date_naive();

        let summary = DashboardSummary::load(test_db.db(), tomorrow).await.unwrap();
        assert!(summary.customers > 0);
        assert!(
            summary
                .appointments_today
                .iter()
                .all(|a| a.starts_at.date_naive() == tomorrow
                    && a.status == AppointmentStatus::Scheduled)
        );
        assert!(
            summary
                .appointments_today
                .windows(2)
                .all(|w| w[0].starts_at <= w[1].starts_at)
        );
    }
}
