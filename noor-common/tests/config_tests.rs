//! Configuration loading and graceful degradation tests
//!
//! Uses serial_test because several tests manipulate NOOR_CONFIG and
//! NOOR_LLM_API_KEY, which are process-wide.

use noor_common::config::{NoorConfig, CONFIG_ENV_VAR, LLM_API_KEY_ENV_VAR};
use noor_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::TempDir;

fn clear_env() {
    env::remove_var(CONFIG_ENV_VAR);
    env::remove_var(LLM_API_KEY_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist.toml");

    let config = NoorConfig::load(Some(&missing)).expect("missing config should not fail");

    assert_eq!(config.quran.api_base_url, "https://api.alquran.cloud/v1");
    assert!(config.llm.api_key().is_none());
}

#[test]
#[serial]
fn test_explicit_file_is_loaded() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[quran]
api_base_url = "http://127.0.0.1:9000/v1"
commentary_edition = "ar.jalalayn"

[logging]
level = "debug"
"#
    )
    .unwrap();

    let config = NoorConfig::load(Some(&path)).unwrap();

    assert_eq!(config.quran.api_base_url, "http://127.0.0.1:9000/v1");
    assert_eq!(config.quran.commentary_edition, "ar.jalalayn");
    assert_eq!(config.quran.text_edition, "quran-uthmani");
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_env_var_selects_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("from-env.toml");
    std::fs::write(&path, "[quran]\nsearch_language = \"en\"\n").unwrap();
    env::set_var(CONFIG_ENV_VAR, &path);

    let config = NoorConfig::load(None).unwrap();
    clear_env();

    assert_eq!(config.quran.search_language, "en");
}

#[test]
#[serial]
fn test_env_credential_overrides_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[llm]\napi_key = \"from-file\"\n").unwrap();
    env::set_var(LLM_API_KEY_ENV_VAR, "from-env");

    let config = NoorConfig::load(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.llm.api_key(), Some("from-env"));
}

#[test]
#[serial]
fn test_blank_env_credential_is_ignored() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[llm]\napi_key = \"from-file\"\n").unwrap();
    env::set_var(LLM_API_KEY_ENV_VAR, "  ");

    let config = NoorConfig::load(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.llm.api_key(), Some("from-file"));
}

#[test]
#[serial]
fn test_malformed_file_is_error() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "[quran\napi_base_url = ").unwrap();

    let result = NoorConfig::load(Some(&path));

    assert!(matches!(result, Err(Error::Toml(_))));
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[quran]\nrequest_timeout_secs = 0\n").unwrap();

    let result = NoorConfig::load(Some(&path));

    assert!(matches!(result, Err(Error::Config(_))));
}
