//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temp data directory via
//! `REFOMO_DATA_DIR`, so nothing touches the real config.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `dir` and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "refomo-cli", "--quiet", "--"])
        .args(args)
        .env("REFOMO_DATA_DIR", dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_status_starts_idle() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["state"], "idle");
    assert_eq!(snapshot["display_time"], "25:00");
}

#[test]
fn test_session_state_persists_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["timer", "start", "--minutes", "1"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["timer", "tick", "--count", "5"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"remaining_secs\": 55"));

    let (stdout, _, _) = run_cli(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["state"], "running");
    assert_eq!(snapshot["remaining_secs"], 55);
}

#[test]
fn test_completed_session_can_be_recorded_and_listed() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["timer", "start", "--minutes", "1"]);
    run_cli(dir.path(), &["timer", "goal", "write tests"]);
    let (stdout, _, _) = run_cli(dir.path(), &["timer", "tick", "--count", "60"]);
    assert!(stdout.contains("SessionFinished"));

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["record", "save", "--focus-level", "4", "--reflection", "done"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Record saved"));

    let (stdout, _, code) = run_cli(dir.path(), &["history", "list", "--json"]);
    assert_eq!(code, 0);
    let records: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["goal"], "write tests");
    assert_eq!(records[0]["focusLevel"], 4);
    assert_eq!(records[0]["actualDuration"], 60);
}

#[test]
fn test_record_save_requires_completed_session() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["record", "save"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no completed session"));
}

#[test]
fn test_config_get_and_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "timer.default_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.default_minutes", "45"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "timer.default_minutes"]);
    assert_eq!(stdout.trim(), "45");

    // A fresh engine picks the new dial default up.
    let (stdout, _, _) = run_cli(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["display_time"], "45:00");
}
