//! # tasklist
//!
//! SQLite-backed to-do list with a single screen of state.
//!
//! Provides the item store (sqlx over a local SQLite file), the list
//! controller that keeps the pending and completed partitions in sync with
//! the store, a plain-text screen, and OpenTelemetry observability.

pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod model;
pub mod screen;
pub mod telemetry;
