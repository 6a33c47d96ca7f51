use postboard::api::FetchPolicy;
use postboard::config::{Config, ConfigError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.endpoint, "http://localhost:4000/graphql");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.api.fetch_policy, FetchPolicy::CacheFirst);
    assert!(config.storage.path.is_none());
    assert_eq!(config.logging.filter, "warn");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("postboard/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.api.endpoint, "http://localhost:4000/graphql");
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = write_config(
        r#"
[api]
endpoint = "https://posts.example.com/graphql"
fetch_policy = "network-only"

[storage]
path = "/tmp/postboard-session.json"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.endpoint, "https://posts.example.com/graphql");
    assert_eq!(config.api.fetch_policy, FetchPolicy::NetworkOnly);
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(
        config.storage.path,
        Some(PathBuf::from("/tmp/postboard-session.json"))
    );
    assert_eq!(config.logging.filter, "warn");
}

#[test]
fn test_invalid_endpoint_fails_validation() {
    let (_dir, path) = write_config(
        r#"
[api]
endpoint = "ftp://posts.example.com"
"#,
    );

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn test_zero_timeout_fails_validation() {
    let mut config = Config::default();
    config.api.timeout_seconds = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = write_config("[api\nendpoint = ");
    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_unknown_fetch_policy_is_parse_error() {
    let (_dir, path) = write_config(
        r#"
[api]
fetch_policy = "cache-only"
"#,
    );
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}
