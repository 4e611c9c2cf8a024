//! Drives the compiled binary through its non-interactive commands.
//!
//! Every test points HOME at a temp dir so the user's own config and logs
//! are never touched.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stretch925(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stretch925").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("STRETCH925_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn exercises_lists_every_stretch() {
    let home = TempDir::new().unwrap();
    stretch925(&home)
        .arg("exercises")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stretches (3)"))
        .stdout(predicate::str::contains("Y-W"))
        .stdout(predicate::str::contains("Neck"))
        .stdout(predicate::str::contains("Side"));
}

#[test]
fn exercises_as_json() {
    let home = TempDir::new().unwrap();
    let output = stretch925(&home)
        .args(["exercises", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 3);
    assert_eq!(value["items"][1]["id"], "neck");
}

#[test]
fn score_tallies_best_per_person() {
    let home = TempDir::new().unwrap();
    let log = home.path().join("tmp.txt");
    fs::write(&log, "0:100\n1:30\n0:140\n1:25\n").unwrap();

    stretch925(&home)
        .arg("score")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 170"))
        .stdout(predicate::str::contains("You have earned 17 points!"));
}

#[test]
fn score_missing_file_fails() {
    let home = TempDir::new().unwrap();
    stretch925(&home)
        .args(["score", "does-not-exist.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not tally"));
}

#[test]
fn config_path_points_into_home() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join(".stretch925").join("config.yaml");

    stretch925(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();
    let config_file = home.path().join(".stretch925").join("config.yaml");

    stretch925(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(config_file.exists());

    stretch925(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    stretch925(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions:      4"));
}

#[test]
fn config_flag_overrides_default_location() {
    let home = TempDir::new().unwrap();
    let custom = home.path().join("custom.yaml");
    fs::write(&custom, "timer:\n  session_count: 2\n").unwrap();

    let output = stretch925(&home)
        .args(["--output", "json", "config", "show", "--config"])
        .arg(&custom)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["timer"]["session_count"], 2);
    assert_eq!(value["config"]["timer"]["work_seconds"], 1500);
}

#[test]
fn broken_config_is_reported() {
    let home = TempDir::new().unwrap();
    let custom = home.path().join("broken.yaml");
    fs::write(&custom, "timer: [not, a, map]\n").unwrap();

    stretch925(&home)
        .args(["exercises", "--config"])
        .arg(&custom)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    stretch925(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stretch925"));
}

#[test]
fn out_of_range_sessions_rejected_by_parser() {
    let home = TempDir::new().unwrap();
    stretch925(&home)
        .args(["run", "--sessions", "6"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_duration_rejected_by_parser() {
    let home = TempDir::new().unwrap();
    stretch925(&home)
        .args(["run", "--work", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn zero_work_in_config_fails_before_terminal() {
    let home = TempDir::new().unwrap();
    let custom = home.path().join("zero.yaml");
    fs::write(&custom, "timer:\n  work_seconds: 0\n").unwrap();

    stretch925(&home)
        .args(["run", "--config"])
        .arg(&custom)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("work duration"));
}
