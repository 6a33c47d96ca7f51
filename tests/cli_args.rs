//! Tests for CLI argument parsing against the built binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn postboard_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_postboard"))
}

#[test]
fn test_help_lists_subcommands() {
    let output = postboard_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["posts", "search", "signin", "signout", "user-posts"] {
        assert!(stdout.contains(subcommand), "missing {}: {}", subcommand, stdout);
    }
    assert!(stdout.contains("--endpoint"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let output = postboard_cmd().output().expect("Failed to execute command");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_endpoint_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = postboard_cmd()
        .arg("--config")
        .arg(temp_dir.path().join("absent.toml"))
        .arg("--endpoint")
        .arg("not-a-url")
        .arg("posts")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must be an http(s) URL"), "stderr: {}", stderr);
}

#[test]
fn test_malformed_config_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[api\n").unwrap();

    let output = postboard_cmd()
        .arg("--config")
        .arg(&path)
        .arg("posts")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"), "stderr: {}", stderr);
}
