use crate::auth::rbac::Resource;
use crate::storage::database::entities::{self, expense, revenue};
use crate::storage::repository::{RecordFilter, SalonRecord};
use crate::utils::error::Result;
use crate::utils::validation::require;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{Condition, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::non_negative;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub spent_on: NaiveDate,
}

impl SalonRecord for expense::Model {
    type Entity = entities::Expense;
    type Active = expense::ActiveModel;
    type Input = ExpenseInput;

    const RESOURCE: Resource = Resource::Finances;
    const NAME: &'static str = "expense";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> expense::Column {
        expense::Column::Id
    }

    fn sort_column() -> expense::Column {
        expense::Column::SpentOn
    }

    fn newest_first() -> bool {
        true
    }

    fn validate(input: &ExpenseInput) -> Result<()> {
        require("description", &input.description)?;
        require("category", &input.category)?;
        non_negative("amount", input.amount)
    }

    fn new_active(input: ExpenseInput, id: Uuid, now: DateTime<Utc>) -> expense::ActiveModel {
        expense::ActiveModel {
            id: Set(id),
            description: Set(input.description.trim().to_string()),
            category: Set(input.category.trim().to_string()),
            amount: Set(input.amount),
            spent_on: Set(input.spent_on),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut expense::ActiveModel, input: ExpenseInput, now: DateTime<Utc>) {
        active.description = Set(input.description.trim().to_string());
        active.category = Set(input.category.trim().to_string());
        active.amount = Set(input.amount);
        active.spent_on = Set(input.spent_on);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use expense::Column;
        filter
            .text_condition(&[Column::Description])
            .add(filter.status_condition(Column::Category))
            .add(filter.day_condition(Column::SpentOn))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueInput {
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub received_on: NaiveDate,
    #[serde(default)]
    pub appointment_id: Option<Uuid>,
}

impl SalonRecord for revenue::Model {
    type Entity = entities::Revenue;
    type Active = revenue::ActiveModel;
    type Input = RevenueInput;

    const RESOURCE: Resource = Resource::Finances;
    const NAME: &'static str = "revenue";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> revenue::Column {
        revenue::Column::Id
    }

    fn sort_column() -> revenue::Column {
        revenue::Column::ReceivedOn
    }

    fn newest_first() -> bool {
        true
    }

    fn validate(input: &RevenueInput) -> Result<()> {
        require("description", &input.description)?;
        require("category", &input.category)?;
        non_negative("amount", input.amount)
    }

    fn new_active(input: RevenueInput, id: Uuid, now: DateTime<Utc>) -> revenue::ActiveModel {
        revenue::ActiveModel {
            id: Set(id),
            description: Set(input.description.trim().to_string()),
            category: Set(input.category.trim().to_string()),
            amount: Set(input.amount),
            received_on: Set(input.received_on),
            appointment_id: Set(input.appointment_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut revenue::ActiveModel, input: RevenueInput, now: DateTime<Utc>) {
        active.description = Set(input.description.trim().to_string());
        active.category = Set(input.category.trim().to_string());
        active.amount = Set(input.amount);
        active.received_on = Set(input.received_on);
        active.appointment_id = Set(input.appointment_id);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use revenue::Column;
        filter
            .text_condition(&[Column::Description])
            .add(filter.status_condition(Column::Category))
            .add(filter.day_condition(Column::ReceivedOn))
    }
}
