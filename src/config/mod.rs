//! Typed configuration from environment variables.
//!
//! Loads once at startup. Every variable has a default, so a bare
//! environment yields a working config; malformed values fail fast.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "db.db";

/// How long the success notice stays on screen.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub notice_duration: Duration,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let notice_duration = match lookup("NOTICE_DURATION_MS") {
            Some(raw) => Duration::from_millis(parse_millis("NOTICE_DURATION_MS", &raw)?),
            None => DEFAULT_NOTICE_DURATION,
        };

        Ok(Self {
            database_path: lookup("DATABASE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            notice_duration,
            otel_endpoint: lookup("OTEL_ENDPOINT").filter(|e| !e.trim().is_empty()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            notice_duration: DEFAULT_NOTICE_DURATION,
            otel_endpoint: None,
            log_level: "info".to_string(),
        }
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{name} must be a whole number of milliseconds, got {raw:?}")))
}
