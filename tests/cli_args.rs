//! Tests for the `flowstore` binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn flowstore_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flowstore"))
}

#[test]
fn test_help_lists_options() {
    let output = flowstore_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--json"));
}

#[test]
fn test_observers_print_in_registration_order() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "history_limit = 4\n").unwrap();

    let output = flowstore_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("set:10")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["Foo: {value: 10}", "Boo: {value: 10}", "state: {value: 10}"]
    );
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let output = flowstore_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("--json")
        .arg("inc:2")
        .arg("label:hits")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = stdout.lines().last().unwrap();
    assert_eq!(last, r#"state: {"value":2,"label":"hits"}"#);
}

#[test]
fn test_invalid_event_exits_with_error() {
    let output = flowstore_cmd()
        .arg("bump:1")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Unknown event 'bump:1'"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "observer_failure = \"explode\"\n").unwrap();

    let output = flowstore_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("set:1")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"));
}
