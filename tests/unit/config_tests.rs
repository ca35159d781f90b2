//! Configuration parsing, validation, and credential loading tests.

use std::env;

use docfill::config::GlobalConfig;
use docfill::AppError;
use serial_test::serial;

const KEY_VAR: &str = "DOCFILL_ASSISTANT_API_KEY";

#[test]
fn defaults_are_sensible() {
    let config = GlobalConfig::default();
    assert_eq!(config.http_port, 8000);
    assert_eq!(config.retention_minutes, 240);
    assert_eq!(config.max_sessions, 64);
    assert_eq!(config.assistant.api_base, "https://api.groq.com/openai/v1");
    assert_eq!(config.assistant.model, "llama-3.3-70b-versatile");
    assert_eq!(config.assistant.request_seconds, 30);
    assert!(config.assistant.api_key.is_empty());
}

#[test]
fn partial_toml_falls_back_to_defaults() {
    let config = GlobalConfig::from_toml_str("http_port = 9000\n").expect("parse");
    assert_eq!(config.http_port, 9000);
    assert_eq!(config.retention_minutes, 240);
    assert_eq!(config.max_sessions, 64);
}

#[test]
fn nested_assistant_section_parses() {
    let config = GlobalConfig::from_toml_str(
        "retention_minutes = 30\n\n[assistant]\nmodel = \"test-model\"\nrequest_seconds = 5\n",
    )
    .expect("parse");
    assert_eq!(config.retention_minutes, 30);
    assert_eq!(config.assistant.model, "test-model");
    assert_eq!(config.assistant.request_seconds, 5);
    assert_eq!(config.assistant.api_base, "https://api.groq.com/openai/v1");
}

#[test]
fn zero_max_sessions_is_rejected() {
    let err = GlobalConfig::from_toml_str("max_sessions = 0\n").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn zero_retention_is_rejected() {
    let err = GlobalConfig::from_toml_str("retention_minutes = 0\n").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn empty_api_base_is_rejected() {
    let err = GlobalConfig::from_toml_str("[assistant]\napi_base = \"\"\n").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn api_key_in_toml_is_ignored() {
    // The key field is skipped during deserialization; only the
    // environment can populate it.
    let config =
        GlobalConfig::from_toml_str("[assistant]\napi_key = \"from-file\"\n").expect("parse");
    assert!(config.assistant.api_key.is_empty());
}

#[test]
#[serial]
fn credentials_load_from_environment() {
    env::set_var(KEY_VAR, "gsk_test");
    let mut config = GlobalConfig::default();
    config.load_credentials();
    env::remove_var(KEY_VAR);
    assert_eq!(config.assistant.api_key, "gsk_test");
}

#[test]
#[serial]
fn missing_credentials_leave_key_empty() {
    env::remove_var(KEY_VAR);
    let mut config = GlobalConfig::default();
    config.load_credentials();
    assert!(config.assistant.api_key.is_empty());
}

#[test]
fn load_from_path_reports_missing_file() {
    let err = GlobalConfig::load_from_path("/nonexistent/config.toml").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn load_from_path_reads_a_real_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "http_port = 9123\n").expect("write");
    let config = GlobalConfig::load_from_path(&path).expect("load");
    assert_eq!(config.http_port, 9123);
}
