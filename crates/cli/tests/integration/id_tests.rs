//! Integration tests for the id command.

use predicates::prelude::*;

use super::helpers::irm_cmd;

fn id_args(lltv: &str) -> [String; 11] {
    [
        "id",
        "--loan-token",
        "0x1111111111111111111111111111111111111111",
        "--collateral-token",
        "0x2222222222222222222222222222222222222222",
        "--oracle",
        "0x3333333333333333333333333333333333333333",
        "--irm",
        "0x4444444444444444444444444444444444444444",
        "--lltv",
        lltv,
    ]
    .map(String::from)
}

#[test]
fn test_id_json_output() {
    irm_cmd()
        .args(id_args("500000000000000001"))
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0xa3dd2fc234e8a139e48baffe577b31229c006da65d76d95a39752431586bb77a",
        ))
        .stdout(predicate::str::contains("06f05b59d3b20001"));
}

#[test]
fn test_id_accepts_hex_lltv() {
    irm_cmd()
        .args(id_args("0x6f05b59d3b20002"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "42f1ca9a810bdf16c9f3c671103fa432a8a71b34c441d252877a8694b82b32b4",
        ));
}

#[test]
fn test_id_invalid_address() {
    irm_cmd()
        .args([
            "id",
            "--loan-token",
            "0x1234",
            "--collateral-token",
            "0x2222222222222222222222222222222222222222",
            "--oracle",
            "0x3333333333333333333333333333333333333333",
            "--irm",
            "0x4444444444444444444444444444444444444444",
            "--lltv",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --loan-token"));
}
