//! Core data model.
//!
//! A work item is one entry on the to-do list. It has identity assigned by
//! the store, a free-form description, and a completion flag that places it
//! in exactly one of two partitions.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Work Item
// ---------------------------------------------------------------------------

/// A single to-do entry as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Store-assigned identifier. Never reused.
    pub id: ItemId,

    /// Whether the item has been marked complete.
    pub done: bool,

    /// Task description, already trimmed.
    pub value: String,
}

impl WorkItem {
    pub fn partition(&self) -> Partition {
        Partition::from_done(self.done)
    }
}

/// Newtype for item IDs (SQLite rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(ItemId)
    }
}

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// The two disjoint views of the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// `done = false`.
    Pending,
    /// `done = true`.
    Completed,
}

impl Partition {
    pub fn from_done(done: bool) -> Self {
        if done {
            Partition::Completed
        } else {
            Partition::Pending
        }
    }

    /// The `done` flag that selects this partition.
    pub fn done(self) -> bool {
        matches!(self, Partition::Completed)
    }

    /// Section heading shown on screen.
    pub fn heading(self) -> &'static str {
        match self {
            Partition::Pending => "Pendente",
            Partition::Completed => "Completa",
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Partition::Pending => "pending",
            Partition::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// Normalize user input into a storable description.
///
/// Returns `None` for empty or all-whitespace text.
pub fn normalize_value(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
