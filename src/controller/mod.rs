//! List controller: turns user actions into store calls and keeps the two
//! partitions and the notice banner in sync with the store.
//!
//! Every mutating action awaits its committed store call and then
//! re-queries both partitions, whichever one actually changed.

pub mod notice;

pub use notice::{Notice, NoticeKind, SUCCESS_TEXT};

use crate::config::{Config, DEFAULT_NOTICE_DURATION};
use crate::db::Db;
use crate::db::items::InsertResult;
use crate::error::{Error, Result};
use crate::model::{ItemId, Partition, WorkItem, normalize_value};
use crate::telemetry::metrics;
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Configuration for the list controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// How long a success notice stays visible.
    pub notice_duration: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }
}

impl From<&Config> for ControllerConfig {
    fn from(config: &Config) -> Self {
        Self {
            notice_duration: config.notice_duration,
        }
    }
}

/// What a user action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The store was mutated and both lists were re-read.
    Applied,
    /// Nothing to do: blank input, or an item outside the tapped list.
    Ignored,
    /// The store reported an error; a failure notice is showing.
    Failed,
}

impl std::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionOutcome::Applied => "applied",
            ActionOutcome::Ignored => "ignored",
            ActionOutcome::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Screen state plus the store it mirrors.
pub struct ListController {
    db: Arc<Db>,
    config: ControllerConfig,
    input: String,
    pending: Vec<WorkItem>,
    completed: Vec<WorkItem>,
    notice: Option<Notice>,
}

impl ListController {
    /// Ensure the schema exists, then load both partitions.
    ///
    /// A schema failure is returned; the caller should abort startup.
    pub async fn mount(db: Arc<Db>, config: ControllerConfig) -> Result<Self> {
        db.ensure_schema().await?;

        let mut controller = Self {
            db,
            config,
            input: String::new(),
            pending: Vec::new(),
            completed: Vec::new(),
            notice: None,
        };
        controller.refresh().await;

        info!(
            pending = controller.pending.len(),
            completed = controller.completed.len(),
            "list controller mounted"
        );
        Ok(controller)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the text in the input field.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn pending(&self) -> &[WorkItem] {
        &self.pending
    }

    pub fn completed(&self) -> &[WorkItem] {
        &self.completed
    }

    pub fn items(&self, partition: Partition) -> &[WorkItem] {
        match partition {
            Partition::Pending => &self.pending,
            Partition::Completed => &self.completed,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// When the current notice hides itself, if it does.
    pub fn notice_deadline(&self) -> Option<Instant> {
        self.notice.as_ref().and_then(|n| n.expires_at)
    }

    /// Submit the input field as a new item.
    ///
    /// Blank input is ignored and left in place. On success the input is
    /// cleared and the success notice (re)starts its countdown.
    pub async fn add(&mut self) -> ActionOutcome {
        let outcome = if normalize_value(&self.input).is_none() {
            ActionOutcome::Ignored
        } else {
            match self.db.insert_item(&self.input).await {
                Ok(InsertResult::Inserted(item)) => {
                    info!(id = %item.id, "item added");
                    self.input.clear();
                    self.notice = Some(Notice::success(
                        Instant::now(),
                        self.config.notice_duration,
                    ));
                    self.refresh().await
                }
                Ok(InsertResult::Rejected) => ActionOutcome::Ignored,
                Err(e) => self.fail("add", e),
            }
        };
        tally("add", outcome)
    }

    /// Tap on a pending item: mark it done.
    pub async fn complete(&mut self, id: ItemId) -> ActionOutcome {
        let outcome = if !contains(&self.pending, id) {
            debug!(%id, "complete ignored, item is not pending");
            ActionOutcome::Ignored
        } else {
            match self.db.set_done(id).await {
                Ok(_) => self.refresh().await,
                Err(e) => self.fail("complete", e),
            }
        };
        tally("complete", outcome)
    }

    /// Tap on a completed item: delete it.
    pub async fn remove(&mut self, id: ItemId) -> ActionOutcome {
        let outcome = if !contains(&self.completed, id) {
            debug!(%id, "remove ignored, item is not completed");
            ActionOutcome::Ignored
        } else {
            match self.db.delete_item(id).await {
                Ok(_) => self.refresh().await,
                Err(e) => self.fail("remove", e),
            }
        };
        tally("remove", outcome)
    }

    /// Re-read both partitions from the store.
    pub async fn refresh(&mut self) -> ActionOutcome {
        match self.load_partitions().await {
            Ok((pending, completed)) => {
                self.pending = pending;
                self.completed = completed;
                ActionOutcome::Applied
            }
            Err(e) => self.fail("refresh", e),
        }
    }

    async fn load_partitions(&self) -> Result<(Vec<WorkItem>, Vec<WorkItem>)> {
        let pending = self.db.list_partition(Partition::Pending).await?;
        let completed = self.db.list_partition(Partition::Completed).await?;
        Ok((pending, completed))
    }

    /// Hide the notice if its deadline has passed. Returns whether it hid.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
            debug!("notice expired");
            true
        } else {
            false
        }
    }

    /// Sleep until the current notice's deadline, then hide it.
    ///
    /// Never returns while no expiring notice is showing.
    pub async fn wait_notice_expiry(&mut self) {
        sleep_until_deadline(self.notice_deadline()).await;
        self.expire_notice(Instant::now());
    }

    /// Hide any notice, including a failure.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Close the store. The controller is unusable afterwards.
    pub async fn shutdown(self) {
        self.db.close().await;
        info!("list controller shut down");
    }

    fn fail(&mut self, action: &str, err: Error) -> ActionOutcome {
        error!(action, error = %err, "store operation failed");
        self.notice = Some(Notice::failure(format!(
            "Não foi possível concluir a operação: {err}"
        )));
        ActionOutcome::Failed
    }
}

/// Sleep until `deadline`, or forever when there is none.
///
/// Takes the deadline by value so callers can race it in `select!` while
/// still mutating the controller in the other branches.
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending::<()>().await,
    }
}

fn contains(items: &[WorkItem], id: ItemId) -> bool {
    items.iter().any(|item| item.id == id)
}

fn tally(action: &'static str, outcome: ActionOutcome) -> ActionOutcome {
    metrics::controller_actions().add(
        1,
        &[
            KeyValue::new("action", action),
            KeyValue::new("outcome", outcome.to_string()),
        ],
    );
    outcome
}
