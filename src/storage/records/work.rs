use crate::auth::rbac::Resource;
use crate::core::models::TaskStatus;
use crate::storage::database::entities::{self, notification, task};
use crate::storage::repository::{RecordFilter, SalonRecord};
use crate::utils::error::Result;
use crate::utils::validation::require;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ColumnTrait, Condition, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clean;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "todo")]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_id: Option<Uuid>,
    #[serde(default)]
    pub due_on: Option<NaiveDate>,
}

fn todo() -> TaskStatus {
    TaskStatus::Todo
}

impl SalonRecord for task::Model {
    type Entity = entities::Task;
    type Active = task::ActiveModel;
    type Input = TaskInput;

    const RESOURCE: Resource = Resource::Tasks;
    const NAME: &'static str = "task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> task::Column {
        task::Column::Id
    }

    fn sort_column() -> task::Column {
        task::Column::CreatedAt
    }

    fn validate(input: &TaskInput) -> Result<()> {
        require("title", &input.title).map(|_| ())
    }

    fn new_active(input: TaskInput, id: Uuid, now: DateTime<Utc>) -> task::ActiveModel {
        task::ActiveModel {
            id: Set(id),
            title: Set(input.title.trim().to_string()),
            description: Set(clean(input.description)),
            status: Set(input.status),
            assignee_id: Set(input.assignee_id),
            due_on: Set(input.due_on),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut task::ActiveModel, input: TaskInput, now: DateTime<Utc>) {
        active.title = Set(input.title.trim().to_string());
        active.description = Set(clean(input.description));
        active.status = Set(input.status);
        active.assignee_id = Set(input.assignee_id);
        active.due_on = Set(input.due_on);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use task::Column;
        filter
            .text_condition(&[Column::Title, Column::Description])
            .add(filter.status_condition(Column::Status))
            .add(filter.day_condition(Column::DueOn))
    }
}

/// Status filter values of the notification list
const READ: &str = "read";
const UNREAD: &str = "unread";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationInput {
    /// Recipient; `None` addresses every dashboard user
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
}

impl SalonRecord for notification::Model {
    type Entity = entities::Notification;
    type Active = notification::ActiveModel;
    type Input = NotificationInput;

    const RESOURCE: Resource = Resource::Notifications;
    const NAME: &'static str = "notification";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> notification::Column {
        notification::Column::Id
    }

    fn sort_column() -> notification::Column {
        notification::Column::CreatedAt
    }

    fn newest_first() -> bool {
        true
    }

    fn validate(input: &NotificationInput) -> Result<()> {
        require("title", &input.title)?;
        require("message", &input.message).map(|_| ())
    }

    fn new_active(input: NotificationInput, id: Uuid, now: DateTime<Utc>) -> notification::ActiveModel {
        notification::ActiveModel {
            id: Set(id),
            user_id: Set(input.user_id),
            title: Set(input.title.trim().to_string()),
            message: Set(input.message.trim().to_string()),
            read: Set(input.read),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut notification::ActiveModel, input: NotificationInput, now: DateTime<Utc>) {
        active.user_id = Set(input.user_id);
        active.title = Set(input.title.trim().to_string());
        active.message = Set(input.message.trim().to_string());
        active.read = Set(input.read);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use notification::Column;
        let status = match filter.status.as_deref() {
            Some(READ) => Condition::all().add(Column::Read.eq(true)),
            Some(UNREAD) => Condition::all().add(Column::Read.eq(false)),
            _ => Condition::all(),
        };
        status.add(filter.text_condition(&[Column::Title, Column::Message]))
    }
}
