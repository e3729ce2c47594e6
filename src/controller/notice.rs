//! Transient notice banner: success after an insert, failure after a store
//! error.

use std::time::{Duration, Instant};

/// Text shown after a successful insert.
pub const SUCCESS_TEXT: &str = "Item adicionado com sucesso!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A visible banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// When the banner hides itself. Failures have none and stay until
    /// replaced or dismissed.
    pub expires_at: Option<Instant>,
}

impl Notice {
    /// Success banner expiring `duration` after `now`.
    pub fn success(now: Instant, duration: Duration) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: SUCCESS_TEXT.to_string(),
            expires_at: Some(now + duration),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            text: text.into(),
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}
