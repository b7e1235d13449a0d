use crate::storage::{RecordFilter, RecordRepository, SalonRecord};
use crate::utils::error::GlowError;
use crate::utils::{Notice, Scope};
use sea_orm::IntoActiveModel;
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

/// What a list screen currently shows
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "records", rename_all = "snake_case")]
pub enum ScreenState<R> {
    /// Not mounted yet
    Idle,
    Loading,
    Ready(Vec<R>),
    /// The last load failed; the notice says so
    Failed,
}

impl<R> ScreenState<R> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }
}

/// List, create, edit and delete loop of one business table
///
/// Every mutation re-fetches the list. Failures never escape: they are
/// logged and replaced by a transient [`Notice`]. Results arriving after
/// [`close`](Self::close) are dropped.
#[derive(Debug)]
pub struct ListScreen<R> {
    repo: RecordRepository<R>,
    scope: Scope,
    filter: RecordFilter,
    state: ScreenState<R>,
    notice: Option<Notice>,
}

impl<R> ListScreen<R>
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    pub fn new(repo: RecordRepository<R>) -> Self {
        Self::with_scope(repo, Scope::new())
    }

    /// A screen closed together with `parent`
    pub fn with_scope(repo: RecordRepository<R>, parent: Scope) -> Self {
        Self {
            repo,
            scope: parent.child(),
            filter: RecordFilter::default(),
            state: ScreenState::Idle,
            notice: None,
        }
    }

    pub fn state(&self) -> &ScreenState<R> {
        &self.state
    }

    /// Rows of the last successful load
    pub fn records(&self) -> &[R] {
        match &self.state {
            ScreenState::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Show and clear the pending notice
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Handle that closes this screen from elsewhere
    pub fn scope(&self) -> Scope {
        self.scope.clone()
    }

    pub fn close(&self) {
        self.scope.close();
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_closed()
    }

    /// Initial load with the current filter
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Load with a new filter
    pub async fn load(&mut self, filter: RecordFilter) {
        self.filter = filter;
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        if self.is_closed() {
            return;
        }
        self.state = ScreenState::Loading;

        match self.scope.run(self.repo.list(&self.filter)).await {
            None => debug!("Discarded {} list after close", R::NAME),
            Some(Ok(records)) => self.state = ScreenState::Ready(records),
            Some(Err(e)) => {
                error!("Failed to load {} list: {}", R::NAME, e);
                self.state = ScreenState::Failed;
                self.notice = Some(Notice::LoadFailed);
            }
        }
    }

    /// Submit the create form
    pub async fn create(&mut self, input: R::Input) -> Option<R> {
        let outcome = self.scope.run(self.repo.insert(input)).await?;
        let record = self.settle(outcome, Notice::Saved, Notice::SaveFailed, "create");
        self.refresh().await;
        record
    }

    /// Submit the edit form of row `id`
    pub async fn update(&mut self, id: Uuid, input: R::Input) -> Option<R> {
        let outcome = self.scope.run(self.repo.update(id, input)).await?;
        let record = self.settle(outcome, Notice::Saved, Notice::SaveFailed, "update");
        self.refresh().await;
        record
    }

    /// Confirm deletion of row `id`
    pub async fn delete(&mut self, id: Uuid) -> bool {
        let Some(outcome) = self.scope.run(self.repo.delete(id)).await else {
            return false;
        };
        let deleted = self
            .settle(outcome, Notice::Deleted, Notice::DeleteFailed, "delete")
            .is_some();
        self.refresh().await;
        deleted
    }

    fn settle<T>(
        &mut self,
        outcome: crate::utils::Result<T>,
        success: Notice,
        failure: Notice,
        action: &str,
    ) -> Option<T> {
        match outcome {
            Ok(value) => {
                self.notice = Some(success);
                Some(value)
            }
            Err(e) => {
                error!("Failed to {} {}: {}", action, R::NAME, e);
                self.notice = Some(failure_notice(&e, failure));
                None
            }
        }
    }
}

/// Caller mistakes keep their own message, backend failures get the generic one
fn failure_notice(error: &GlowError, generic: Notice) -> Notice {
    if error.is_backend_failure() {
        generic
    } else {
        error.user_message()
    }
}
