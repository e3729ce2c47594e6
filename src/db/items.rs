//! Item operations: insert, mark done, delete, list by partition.
//!
//! Every mutation runs in its own transaction and is committed before the
//! call returns, so a caller that refreshes afterwards always sees it.

use crate::error::{Error, Result};
use crate::model::{ItemId, Partition, WorkItem, normalize_value};
use crate::telemetry::items::{record_partition_change, start_item_span};
use crate::telemetry::metrics;
use opentelemetry::KeyValue;
use std::future::Future;
use std::time::Instant;
use tracing::{Instrument, Span, debug};

/// Result of inserting an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertResult {
    /// New item was created in the pending partition.
    Inserted(WorkItem),
    /// Input was empty or whitespace; nothing was written.
    Rejected,
}

impl super::Db {
    /// Insert a new pending item. Blank input is rejected without touching
    /// the store.
    pub async fn insert_item(&self, raw: &str) -> Result<InsertResult> {
        let Some(value) = normalize_value(raw) else {
            debug!("rejected blank item");
            metrics::item_operations().add(
                1,
                &[
                    KeyValue::new("operation", "insert"),
                    KeyValue::new("result", "rejected"),
                ],
            );
            return Ok(InsertResult::Rejected);
        };

        observed("insert", async {
            let mut tx = self.pool().begin().await?;
            let id = sqlx::query("INSERT INTO items (done, value) VALUES (0, ?1)")
                .bind(value)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            tx.commit().await?;

            Span::current().record("item.id", id);
            debug!(id, "item inserted");

            Ok::<_, Error>(InsertResult::Inserted(WorkItem {
                id: ItemId(id),
                done: false,
                value: value.to_string(),
            }))
        })
        .await
    }

    /// Mark an item done. Returns `false` when no row changed (unknown id
    /// or already done).
    pub async fn set_done(&self, id: ItemId) -> Result<bool> {
        observed("set_done", async {
            Span::current().record("item.id", id.0);

            let mut tx = self.pool().begin().await?;
            let rows_affected = sqlx::query("UPDATE items SET done = 1 WHERE id = ?1 AND done <> 1")
                .bind(id.0)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tx.commit().await?;

            if rows_affected > 0 {
                record_partition_change(
                    &Span::current(),
                    id,
                    &Partition::Pending.to_string(),
                    &Partition::Completed.to_string(),
                );
            } else {
                debug!(%id, "set_done matched no pending row");
            }
            Ok::<_, Error>(rows_affected > 0)
        })
        .await
    }

    /// Delete an item. Returns `false` when the id did not exist.
    pub async fn delete_item(&self, id: ItemId) -> Result<bool> {
        observed("delete", async {
            Span::current().record("item.id", id.0);

            let mut tx = self.pool().begin().await?;
            let rows_affected = sqlx::query("DELETE FROM items WHERE id = ?1")
                .bind(id.0)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tx.commit().await?;

            if rows_affected > 0 {
                record_partition_change(
                    &Span::current(),
                    id,
                    &Partition::Completed.to_string(),
                    "removed",
                );
            } else {
                debug!(%id, "delete matched no row");
            }
            Ok::<_, Error>(rows_affected > 0)
        })
        .await
    }

    /// Snapshot of every item with the given `done` flag, oldest first.
    pub async fn list_items(&self, done: bool) -> Result<Vec<WorkItem>> {
        observed("list", async {
            let rows: Vec<ItemRow> =
                sqlx::query_as("SELECT id, done, value FROM items WHERE done = ?1 ORDER BY id ASC")
                    .bind(i64::from(done))
                    .fetch_all(self.pool())
                    .await?;
            Ok::<_, Error>(rows.into_iter().map(WorkItem::from).collect())
        })
        .await
    }

    /// Snapshot of one partition.
    pub async fn list_partition(&self, partition: Partition) -> Result<Vec<WorkItem>> {
        self.list_items(partition.done()).await
    }
}

/// Run a store operation inside its span and record count and latency.
async fn observed<T, F>(operation: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let result = fut.instrument(start_item_span(operation)).await;

    let outcome = if result.is_ok() { "ok" } else { "error" };
    metrics::item_operations().add(
        1,
        &[
            KeyValue::new("operation", operation),
            KeyValue::new("result", outcome),
        ],
    );
    metrics::operation_duration_ms().record(
        started.elapsed().as_secs_f64() * 1000.0,
        &[KeyValue::new("operation", operation)],
    );

    result
}

/// Internal row type for sqlx::FromRow.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    done: Option<i64>,
    value: Option<String>,
}

impl From<ItemRow> for WorkItem {
    fn from(row: ItemRow) -> Self {
        WorkItem {
            id: ItemId(row.id),
            done: row.done.unwrap_or(0) != 0,
            value: row.value.unwrap_or_default(),
        }
    }
}
