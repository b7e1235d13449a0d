use crate::core::models::{AppointmentStatus, TaskStatus};
use crate::storage::database::Database;
use crate::storage::database::entities::{
    appointment, customer, expense, inventory_item, revenue, task,
};
use crate::storage::records::LOW_STOCK;
use crate::storage::{RecordFilter, RecordRepository};
use crate::utils::error::Result;
use crate::utils::{Notice, Scope};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{debug, error};

/// Figures shown on the dashboard home screen
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub day: NaiveDate,
    pub customers: u64,
    /// Scheduled appointments of the day, earliest first
    pub appointments_today: Vec<appointment::Model>,
    pub low_stock: Vec<inventory_item::Model>,
    pub open_tasks: usize,
    /// Month to date
    pub revenue: f64,
    /// Month to date
    pub expenses: f64,
}

impl DashboardSummary {
    /// Load every figure for `day`; the queries run concurrently
    pub async fn load(db: &Database, day: NaiveDate) -> Result<Self> {
        let month = RecordFilter {
            from: Some(day.with_day(1).unwrap_or(day)),
            to: Some(day),
            ..RecordFilter::default()
        };
        let today = RecordFilter {
            status: Some(AppointmentStatus::Scheduled.to_string()),
            from: Some(day),
            to: Some(day),
            ..RecordFilter::default()
        };

        let customers = RecordRepository::<customer::Model>::new(db.clone());
        let appointments = RecordRepository::<appointment::Model>::new(db.clone());
        let inventory = RecordRepository::<inventory_item::Model>::new(db.clone());
        let tasks = RecordRepository::<task::Model>::new(db.clone());
        let revenues = RecordRepository::<revenue::Model>::new(db.clone());
        let expenses = RecordRepository::<expense::Model>::new(db.clone());
        let low_stock = RecordFilter::status(LOW_STOCK);
        let all = RecordFilter::default();

        let (customers, appointments_today, low_stock, tasks, revenues, expenses) = tokio::try_join!(
            customers.count(),
            appointments.list(&today),
            inventory.list(&low_stock),
            tasks.list(&all),
            revenues.list(&month),
            expenses.list(&month),
        )?;

        Ok(Self {
            day,
            customers,
            appointments_today,
            low_stock,
            open_tasks: tasks.iter().filter(|t| t.status != TaskStatus::Done).count(),
            revenue: revenues.iter().map(|r| r.amount).sum(),
            expenses: expenses.iter().map(|e| e.amount).sum(),
        })
    }

    pub fn balance(&self) -> f64 {
        self.revenue - self.expenses
    }
}

/// Home screen state
#[derive(Debug)]
pub struct DashboardScreen {
    db: Database,
    scope: Scope,
    summary: Option<DashboardSummary>,
    notice: Option<Notice>,
}

impl DashboardScreen {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            scope: Scope::new(),
            summary: None,
            notice: None,
        }
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn close(&self) {
        self.scope.close();
    }

    pub async fn load(&mut self, day: NaiveDate) {
        match self.scope.run(DashboardSummary::load(&self.db, day)).await {
            None => debug!("Discarded dashboard summary after close"),
            Some(Ok(summary)) => self.summary = Some(summary),
            Some(Err(e)) => {
                error!("Failed to load dashboard summary: {}", e);
                self.notice = Some(Notice::LoadFailed);
            }
        }
    }
}
