//! First-run demo data
//!
//! Seeded once at startup when the customer table is empty, so a fresh
//! install shows populated screens. Screens themselves never seed.

use crate::core::models::{AppointmentStatus, Channel, TaskStatus};
use crate::storage::database::Database;
use crate::storage::database::entities::{
    appointment, coupon, customer, expense, inventory_item, marketing_template, revenue, task,
};
use crate::storage::records::{
    AppointmentInput, CouponInput, CustomerInput, ExpenseInput, InventoryItemInput, RevenueInput,
    TaskInput, TemplateInput,
};
use crate::storage::repository::RecordRepository;
use crate::utils::error::Result;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// How many rows of each kind were inserted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub customers: usize,
    pub appointments: usize,
    pub inventory_items: usize,
    pub expenses: usize,
    pub revenues: usize,
    pub tasks: usize,
    pub templates: usize,
    pub coupons: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Demo data collaborator invoked once at startup
#[derive(Debug, Clone)]
pub struct DemoFixture {
    db: Database,
}

impl DemoFixture {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert the demo rows unless customers already exist
    pub async fn seed_if_empty(&self) -> Result<SeedReport> {
        let customers = RecordRepository::<customer::Model>::new(self.db.clone());
        if customers.count().await? > 0 {
            debug!("Customers present, skipping demo data");
            return Ok(SeedReport::default());
        }

        let report = self.seed(Utc::now()).await?;
        info!(
            "Seeded demo data: {} customers, {} appointments",
            report.customers, report.appointments
        );
        Ok(report)
    }

    async fn seed(&self, now: DateTime<Utc>) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        let today = now.date_naive();

        let customers = RecordRepository::<customer::Model>::new(self.db.clone());
        let mut customer_ids = Vec::new();
        for (name, email, phone, points) in [
            ("Ana Souza", "ana.souza@example.com", "+55 11 91234-5678", 120),
            ("Beatriz Lima", "beatriz.lima@example.com", "+55 11 99876-5432", 40),
            ("Carla Mendes", "carla.mendes@example.com", "+55 21 98765-4321", 0),
        ] {
            let customer = customers
                .insert(CustomerInput {
                    email: Some(email.to_string()),
                    phone: Some(phone.to_string()),
                    loyalty_points: points,
                    ..CustomerInput::named(name)
                })
                .await?;
            customer_ids.push(customer.id);
            report.customers += 1;
        }

        // Tomorrow on the hour, so every demo booking lies in the future
        let tomorrow = (today + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
        let appointments = RecordRepository::<appointment::Model>::new(self.db.clone());
        for (customer_id, (service, hour, minutes, price)) in customer_ids.iter().zip([
            ("Manicure", 9, 60, 45.0),
            ("Gel nails", 11, 90, 120.0),
            ("Pedicure", 14, 60, 55.0),
        ]) {
            let starts_at = tomorrow + Duration::hours(hour);
            appointments
                .insert(AppointmentInput {
                    customer_id: *customer_id,
                    employee_id: None,
                    service: service.to_string(),
                    starts_at,
                    ends_at: starts_at + Duration::minutes(minutes),
                    price: Some(price),
                    status: AppointmentStatus::Scheduled,
                    notes: None,
                })
                .await?;
            report.appointments += 1;
        }

        let inventory = RecordRepository::<inventory_item::Model>::new(self.db.clone());
        for (name, category, quantity, min_quantity, unit_price) in [
            ("Nail polish - red", "polish", 12, 5, 18.9),
            ("Acetone 500ml", "supplies", 3, 4, 12.5),
            ("Cuticle oil", "care", 8, 3, 22.0),
        ] {
            inventory
                .insert(InventoryItemInput {
                    name: name.to_string(),
                    category: Some(category.to_string()),
                    quantity,
                    min_quantity,
                    unit_price,
                    supplier: None,
                })
                .await?;
            report.inventory_items += 1;
        }

        let expenses = RecordRepository::<expense::Model>::new(self.db.clone());
        for (description, category, amount, days_ago) in [
            ("Rent", "fixed", 2500.0, 10),
            ("Polish restock", "supplies", 340.0, 3),
        ] {
            expenses
                .insert(ExpenseInput {
                    description: description.to_string(),
                    category: category.to_string(),
                    amount,
                    spent_on: today - Duration::days(days_ago),
                })
                .await?;
            report.expenses += 1;
        }

        let revenues = RecordRepository::<revenue::Model>::new(self.db.clone());
        for (description, amount, days_ago) in [("Services", 1850.0, 7), ("Services", 920.0, 1)] {
            revenues
                .insert(RevenueInput {
                    description: description.to_string(),
                    category: "services".to_string(),
                    amount,
                    received_on: today - Duration::days(days_ago),
                    appointment_id: None,
                })
                .await?;
            report.revenues += 1;
        }

        let tasks = RecordRepository::<task::Model>::new(self.db.clone());
        for (title, status) in [
            ("Order acetone", TaskStatus::Todo),
            ("Clean sterilizer", TaskStatus::InProgress),
        ] {
            tasks
                .insert(TaskInput {
                    title: title.to_string(),
                    description: None,
                    status,
                    assignee_id: None,
                    due_on: Some(today + Duration::days(2)),
                })
                .await?;
            report.tasks += 1;
        }

        let templates = RecordRepository::<marketing_template::Model>::new(self.db.clone());
        templates
            .insert(TemplateInput {
                name: "Appointment reminder".to_string(),
                channel: Channel::Whatsapp,
                subject: None,
                body: "Hi {name}, see you tomorrow at {time}!".to_string(),
            })
            .await?;
        templates
            .insert(TemplateInput {
                name: "Birthday".to_string(),
                channel: Channel::Email,
                subject: Some("Happy birthday!".to_string()),
                body: "Enjoy 15% off your next visit this month.".to_string(),
            })
            .await?;
        report.templates += 2;

        let coupons = RecordRepository::<coupon::Model>::new(self.db.clone());
        coupons
            .insert(CouponInput {
                code: "WELCOME10".to_string(),
                description: Some("First visit discount".to_string()),
                discount_percent: 10,
                valid_from: Some(today),
                valid_until: Some(today + Duration::days(90)),
                active: true,
            })
            .await?;
        report.coupons += 1;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::repository::RecordFilter;

    async fn test_db() -> Database {
        Database::connect_and_migrate(&DatabaseConfig::in_memory())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_seeds_empty_database_once() {
        let db = test_db().await;
        let fixture = DemoFixture::new(db.clone());

        let first = fixture.seed_if_empty().await.unwrap();
        assert_eq!(first.customers, 3);
        assert_eq!(first.appointments, 3);

        let second = fixture.seed_if_empty().await.unwrap();
        assert!(second.is_empty());

        let customers = RecordRepository::<customer::Model>::new(db)
            .list(&RecordFilter::default())
            .await
            .unwrap();
        assert_eq!(customers.len(), 3);
    }

    #[tokio::test]
    async fn test_skips_database_with_customers() {
        let db = test_db().await;
        RecordRepository::<customer::Model>::new(db.clone())
            .insert(CustomerInput::named("Existing Client"))
            .await
            .unwrap();

        let report = DemoFixture::new(db).seed_if_empty().await.unwrap();
        assert!(report.is_empty());
    }
}
