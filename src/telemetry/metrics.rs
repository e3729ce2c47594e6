//! Metric instrument factories for tasklist.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"tasklist"` meter.

use opentelemetry::metrics::{Counter, Histogram, Meter};

/// Returns the shared meter for tasklist instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("tasklist")
}

/// Counter: store operations.
/// Labels: `operation` ("insert" | "set_done" | "delete" | "list"),
/// `result` ("ok" | "rejected" | "error").
pub fn item_operations() -> Counter<u64> {
    meter()
        .u64_counter("tasklist.item.operations")
        .with_description("Number of item store operations")
        .build()
}

/// Histogram: operation duration in milliseconds.
/// Labels: `operation`.
pub fn operation_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("tasklist.operation.duration_ms")
        .with_description("Operation duration in milliseconds")
        .with_unit("ms")
        .build()
}

/// Counter: user actions handled by the list controller.
/// Labels: `action`, `outcome` ("applied" | "ignored" | "failed").
pub fn controller_actions() -> Counter<u64> {
    meter()
        .u64_counter("tasklist.controller.actions")
        .with_description("Number of user actions handled")
        .build()
}
