//! Integration tests for the rate and utilization commands.

use predicates::prelude::*;

use super::helpers::{fixture_path, irm_cmd};

#[test]
fn test_rate_at_target_first_call_json() {
    irm_cmd()
        .args(["rate", "--supply", "1000", "--borrow", "900", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""utilization": "900000000000000000""#))
        .stdout(predicate::str::contains(r#""avg_borrow_rate": "317097919""#))
        .stdout(predicate::str::contains(r#""end_rate_at_target": "317097919""#));
}

#[test]
fn test_rate_full_utilization_json() {
    irm_cmd()
        .args(["rate", "--supply", "100", "--borrow", "100", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""avg_borrow_rate": "1268391676""#));
}

#[test]
fn test_rate_empty_market_json() {
    irm_cmd()
        .args(["rate", "--supply", "0", "--borrow", "0", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""avg_borrow_rate": "79274479""#));
}

#[test]
fn test_rate_with_seeded_rate_at_target_stays_at_target() {
    irm_cmd()
        .args([
            "rate",
            "--supply",
            "1000",
            "--borrow",
            "900",
            "--rate-at-target",
            "1268391679",
            "--elapsed",
            "86400",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""avg_borrow_rate": "1268391679""#))
        .stdout(predicate::str::contains(r#""end_rate_at_target": "1268391679""#));
}

#[test]
fn test_rate_rejects_out_of_bounds_rate_at_target() {
    irm_cmd()
        .args([
            "rate",
            "--supply",
            "1000",
            "--borrow",
            "900",
            "--rate-at-target",
            "5",
            "--elapsed",
            "86400",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --rate-at-target"))
        .stderr(predicate::str::contains("outside its bounds"));
}

#[test]
fn test_rate_table_output() {
    irm_cmd()
        .args(["rate", "--supply", "1000", "--borrow", "900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Borrow Rate Quote"))
        .stdout(predicate::str::contains("90.00%"))
        .stdout(predicate::str::contains("317097919"));
}

#[test]
fn test_rate_with_curve_file() {
    // Steepness 10: full utilization pays ten times the rate at target
    irm_cmd()
        .args(["rate", "--supply", "100", "--borrow", "100", "--format", "json"])
        .args(["--curve", &fixture_path("curve_steep")])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""avg_borrow_rate": "3170979190""#));
}

#[test]
fn test_rate_flag_overrides_curve_file() {
    irm_cmd()
        .args(["rate", "--supply", "100", "--borrow", "100", "--format", "json"])
        .args(["--curve", &fixture_path("curve_steep")])
        .args(["--curve-steepness", "2000000000000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""avg_borrow_rate": "634195838""#));
}

#[test]
fn test_rate_curve_from_env() {
    irm_cmd()
        .env("IRM_CURVE_STEEPNESS", "10000000000000000000")
        .args(["rate", "--supply", "100", "--borrow", "100", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""avg_borrow_rate": "3170979190""#));
}

#[test]
fn test_rate_invalid_curve_from_env() {
    irm_cmd()
        .env("IRM_TARGET_UTILIZATION", "1000000000000000000")
        .args(["rate", "--supply", "100", "--borrow", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target utilization"));
}

#[test]
fn test_utilization_at_target_json() {
    irm_cmd()
        .args([
            "utilization",
            "--borrow-rate",
            "317097919",
            "--rate-at-target",
            "317097919",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""utilization": "900000000000000000""#));
}

#[test]
fn test_utilization_with_supply_change() {
    irm_cmd()
        .args([
            "utilization",
            "--borrow-rate",
            "317097919",
            "--rate-at-target",
            "317097919",
            "--supply",
            "1000000",
            "--borrow",
            "450000",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""action": "withdraw""#))
        .stdout(predicate::str::contains(r#""amount": "500000""#));
}
