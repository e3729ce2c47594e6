use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tasklist::config::Config;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn config_defaults_when_nothing_is_set() {
    let config = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.database_path, PathBuf::from("db.db"));
    assert_eq!(config.notice_duration, Duration::from_millis(3000));
    assert!(config.otel_endpoint.is_none());
    assert_eq!(config.log_level, "info");
}

#[test]
fn config_reads_every_variable() {
    let config = Config::from_lookup(lookup(&[
        ("DATABASE_PATH", "/tmp/tasks.db"),
        ("NOTICE_DURATION_MS", "1500"),
        ("OTEL_ENDPOINT", "http://localhost:4317"),
        ("LOG_LEVEL", "debug"),
    ]))
    .unwrap();

    assert_eq!(config.database_path, PathBuf::from("/tmp/tasks.db"));
    assert_eq!(config.notice_duration, Duration::from_millis(1500));
    assert_eq!(config.otel_endpoint.as_deref(), Some("http://localhost:4317"));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn blank_optional_values_fall_back() {
    let config = Config::from_lookup(lookup(&[("DATABASE_PATH", " "), ("OTEL_ENDPOINT", "")]))
        .unwrap();

    assert_eq!(config.database_path, PathBuf::from("db.db"));
    assert!(config.otel_endpoint.is_none());
}

#[test]
fn config_fails_on_malformed_notice_duration() {
    let result = Config::from_lookup(lookup(&[("NOTICE_DURATION_MS", "three seconds")]));
    assert!(result.is_err());
}

#[test]
fn config_from_env_loads_without_required_vars() {
    let config = Config::from_env();
    // NOTICE_DURATION_MS may be set by the surrounding environment; every
    // other variable has a default.
    if let Ok(config) = config {
        assert!(!config.log_level.is_empty());
    }
}
