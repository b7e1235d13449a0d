//! Generic CRUD over the salon's business tables
//!
//! Every screen in the dashboard is the same list/create/edit/delete loop over
//! a different table. [`SalonRecord`] describes one table; [`RecordRepository`]
//! runs the loop against the database.

use crate::auth::rbac::Resource;
use crate::storage::database::Database;
use crate::utils::error::{GlowError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;
use uuid::Uuid;

/// Narrowing applied to a list query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against the record's text fields
    pub search: Option<String>,
    /// Exact status (or channel/category) value
    pub status: Option<String>,
    /// First day of the date window (inclusive)
    pub from: Option<NaiveDate>,
    /// Last day of the date window (inclusive)
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn search<S: Into<String>>(term: S) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn status<S: Into<String>>(status: S) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Case-insensitive substring match of the search term against any of
    /// `columns`; `%` and `_` in the term are literal
    pub fn text_condition<C: ColumnTrait>(&self, columns: &[C]) -> Condition {
        let Some(term) = self.term() else {
            return Condition::all();
        };
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        columns.iter().fold(Condition::any(), |any, column| {
            any.add(
                Expr::expr(Func::lower(Expr::col(*column)))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            )
        })
    }

    /// Exact status (or channel/category) value
    pub fn status_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        match self.status.as_deref() {
            Some(status) => Condition::all().add(column.eq(status)),
            None => Condition::all(),
        }
    }

    /// Date window over a calendar-day column; rows without a day only
    /// match an open window
    pub fn day_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut condition = self.open_window_or_present(column);
        if let Some(from) = self.from {
            condition = condition.add(column.gte(from));
        }
        if let Some(to) = self.to {
            condition = condition.add(column.lte(to));
        }
        condition
    }

    /// Date window over a timestamp column, whole days in UTC
    pub fn instant_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut condition = self.open_window_or_present(column);
        if let Some(from) = self.from {
            condition = condition.add(column.gte(from.and_time(NaiveTime::MIN).and_utc()));
        }
        if let Some(end) = self
            .to
            .and_then(|to| to.and_time(NaiveTime::MIN).and_utc().checked_add_signed(Duration::days(1)))
        {
            condition = condition.add(column.lt(end));
        }
        condition
    }

    fn open_window_or_present<C: ColumnTrait>(&self, column: C) -> Condition {
        if self.from.is_none() && self.to.is_none() {
            Condition::all()
        } else {
            Condition::all().add(column.is_not_null())
        }
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// One business table as seen by the dashboard screens
pub trait SalonRecord: Clone + fmt::Debug + Serialize + Send + Sync + Sized + 'static {
    type Entity: EntityTrait<Model = Self>;
    type Active: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + From<Self>;
    /// Create/edit form payload
    type Input: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static;

    /// Permission area guarding this table
    const RESOURCE: Resource;
    /// Human readable singular name used in messages
    const NAME: &'static str;

    fn id(&self) -> Uuid;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// Column lists are ordered by
    fn sort_column() -> <Self::Entity as EntityTrait>::Column;

    fn newest_first() -> bool {
        false
    }

    /// Reject an input before it reaches the database
    fn validate(input: &Self::Input) -> Result<()>;

    fn new_active(input: Self::Input, id: Uuid, now: DateTime<Utc>) -> Self::Active;

    /// Overwrite the editable fields of an existing row
    fn apply(active: &mut Self::Active, input: Self::Input, now: DateTime<Utc>);

    /// SQL condition selecting the rows that pass `filter`
    fn condition(filter: &RecordFilter) -> Condition;
}

/// List/get/insert/update/delete for one [`SalonRecord`] table
pub struct RecordRepository<R> {
    db: Database,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordRepository<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for RecordRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordRepository")
            .field("record", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R> RecordRepository<R>
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    /// Rows passing `filter`, in the table's display order
    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<R>> {
        let query = R::Entity::find().filter(R::condition(filter));
        let query = if R::newest_first() {
            query.order_by_desc(R::sort_column())
        } else {
            query.order_by_asc(R::sort_column())
        };

        let rows = query.all(self.db.connection()).await?;
        debug!("Listed {} {} rows ({:?})", rows.len(), R::NAME, filter);
        Ok(rows)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<R>> {
        Ok(R::Entity::find()
            .filter(R::id_column().eq(id))
            .one(self.db.connection())
            .await?)
    }

    /// Like [`find`](Self::find), failing with `NotFound` for a missing row
    pub async fn get(&self, id: Uuid) -> Result<R> {
        self.find(id)
            .await?
            .ok_or_else(|| GlowError::not_found(format!("{} {} not found", R::NAME, id)))
    }

    pub async fn insert(&self, input: R::Input) -> Result<R> {
        R::validate(&input)?;
        let id = Uuid::new_v4();
        let active = R::new_active(input, id, Utc::now());
        let record = active
            .insert(self.db.connection())
            .await
            .map_err(write_error::<R>)?;
        debug!("Created {} {}", R::NAME, id);
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, input: R::Input) -> Result<R> {
        R::validate(&input)?;
        let current = self.get(id).await?;
        let mut active = R::Active::from(current);
        R::apply(&mut active, input, Utc::now());
        let record = active
            .update(self.db.connection())
            .await
            .map_err(write_error::<R>)?;
        debug!("Updated {} {}", R::NAME, id);
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = R::Entity::delete_many()
            .filter(R::id_column().eq(id))
            .exec(self.db.connection())
            .await?;
        if result.rows_affected == 0 {
            return Err(GlowError::not_found(format!("{} {} not found", R::NAME, id)));
        }
        debug!("Deleted {} {}", R::NAME, id);
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let count: Option<i64> = R::Entity::find()
            .select_only()
            .column_as(Expr::col(R::id_column()).count(), "count")
            .into_tuple()
            .one(self.db.connection())
            .await?;
        Ok(count.map_or(0, |c| c.max(0) as u64))
    }
}

fn write_error<R: SalonRecord>(e: DbErr) -> GlowError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            GlowError::conflict(format!("this {} already exists", R::NAME))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            GlowError::validation(format!("{} refers to a missing record", R::NAME))
        }
        _ => GlowError::Database(e),
    }
}
