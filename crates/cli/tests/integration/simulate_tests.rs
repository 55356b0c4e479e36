//! Integration tests for the simulate command.

use predicates::prelude::*;

use super::helpers::{fixture_path, irm_cmd};

const MARKET_ID: &str = "0xa3dd2fc234e8a139e48baffe577b31229c006da65d76d95a39752431586bb77a";

#[test]
fn test_simulate_json_output() {
    let output = irm_cmd()
        .args(["simulate", &fixture_path("scenario_jump"), "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["elapsed"], 0);
    assert_eq!(rows[1]["elapsed"], 86_400);
    // Seeded at 1% per year
    assert_eq!(rows[0]["rate_at_target"], "317097919");

    let seeded: u64 = rows[0]["rate_at_target"].as_str().unwrap().parse().unwrap();
    let adapted: u64 = rows[1]["rate_at_target"].as_str().unwrap().parse().unwrap();
    assert!(adapted > seeded);
}

#[test]
fn test_simulate_table_output() {
    irm_cmd()
        .args(["simulate", &fixture_path("scenario_jump")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rate at Target (APR)"))
        .stdout(predicate::str::contains("1700086400"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn test_simulate_state_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let state = state.to_str().unwrap();

    irm_cmd()
        .args(["simulate", &fixture_path("scenario_jump"), "--state-out", state])
        .assert()
        .success();

    let snapshot = std::fs::read_to_string(state).unwrap();
    assert!(snapshot.contains(MARKET_ID));

    irm_cmd()
        .args(["simulate", &fixture_path("scenario_continue"), "--format", "json"])
        .args(["--state-in", state])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""elapsed": 86400"#));
}

#[test]
fn test_simulate_without_state_treats_market_as_new() {
    irm_cmd()
        .args(["simulate", &fixture_path("scenario_continue"), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""elapsed": 0"#));
}

#[test]
fn test_simulate_rejects_backwards_time() {
    irm_cmd()
        .args(["simulate", &fixture_path("scenario_backwards")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

#[test]
fn test_simulate_rejects_out_of_bounds_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, format!(r#"{{"{MARKET_ID}": "5"}}"#)).unwrap();

    irm_cmd()
        .args(["simulate", &fixture_path("scenario_continue")])
        .arg("--state-in")
        .arg(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid state file"))
        .stderr(predicate::str::contains("Rate at target 5 is outside its bounds"));
}

#[test]
fn test_simulate_verbose_logs_to_stderr() {
    irm_cmd()
        .args(["simulate", &fixture_path("scenario_jump"), "--verbose", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("seeded market"));
}
