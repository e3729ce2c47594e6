//! Item operation span helpers.
//!
//! Provides span creation and partition-change recording for items
//! flowing through the store.

use crate::model::ItemId;
use tracing::Span;

/// Start a span for one store operation.
///
/// The `item.id` field is declared empty and is recorded once known.
pub fn start_item_span(operation: &str) -> Span {
    tracing::info_span!(
        "item.operation",
        "item.operation" = operation,
        "item.id" = tracing::field::Empty,
    )
}

/// Record an item moving between partitions on the given span.
pub fn record_partition_change(span: &Span, id: ItemId, from: &str, to: &str) {
    span.in_scope(|| {
        tracing::info!(id = id.0, from = from, to = to, "partition_change");
    });
}
