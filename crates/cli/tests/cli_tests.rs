//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "netprobe-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Network device monitoring drivers"),
        "Should show app description"
    );
    assert!(stdout.contains("list"), "Should show list command");
    assert!(stdout.contains("validate"), "Should show validate command");
    assert!(stdout.contains("collect"), "Should show collect command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "netprobe-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("netprobe"), "Should show binary name");
}

/// Test global options
#[test]
fn test_global_options() {
    let output = Command::new("cargo")
        .args(["run", "-p", "netprobe-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
    assert!(stdout.contains("--config"), "Should show config option");
    assert!(stdout.contains("NETPROBE_CONFIG"), "Should show env var");
}

/// Test validate subcommand help
#[test]
fn test_validate_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "netprobe-cli", "--", "validate", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Validate help should succeed");
    assert!(stdout.contains("device"), "Should show device argument");
}

/// Test collect subcommand help
#[test]
fn test_collect_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "netprobe-cli", "--", "collect", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Collect help should succeed");
    assert!(stdout.contains("device"), "Should show device argument");
}

/// Test listing devices from an inventory file
#[test]
fn test_list_devices() {
    let config_path = std::env::temp_dir().join("netprobe-cli-test-inventory.toml");
    std::fs::write(
        &config_path,
        r#"
[[devices]]
name = "cache"
driver = "redis-info"
host = "10.0.0.5"
"#,
    )
    .expect("Failed to write inventory");

    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "netprobe-cli",
            "--",
            "--config",
            config_path.to_str().unwrap(),
            "list",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "List should succeed");
    assert!(stdout.contains("cache"), "Should show the device name");
    assert!(stdout.contains("redis-info"), "Should show the driver");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = Command::new("cargo")
        .args(["run", "-p", "netprobe-cli", "--", "invalid-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test missing required argument error handling
#[test]
fn test_missing_argument() {
    let output = Command::new("cargo")
        .args(["run", "-p", "netprobe-cli", "--", "collect"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Missing argument should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required") || stderr.contains("error"),
        "Should show error about missing argument"
    );
}
