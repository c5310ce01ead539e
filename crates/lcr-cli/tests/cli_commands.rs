//! Integration tests for the `lcr` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

fn lcr() -> Command {
    Command::cargo_bin("lcr").unwrap()
}

// --- probability ---

#[test]
fn probability_two_players() {
    lcr()
        .args(["probability", "1", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Position 1 starts with 1 chip(s)."))
        .stdout(predicate::str::contains("Position 2 starts with 1 chip(s)."))
        .stdout(predicate::str::contains(
            "The probability of position 1 winning is",
        ))
        .stdout(predicate::str::contains("33.3333%"));
}

#[test]
fn probability_second_position() {
    lcr()
        .args(["probability", "2", "2", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("52.8736%"));
}

#[test]
fn probability_three_players() {
    lcr()
        .args(["probability", "1", "1", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("28.8472%"));
}

#[test]
fn probability_json() {
    let output = lcr()
        .args(["probability", "1", "2", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["winner"]["position"], 1);
    assert_eq!(value["turn"], 1);
    let p = value["winner"]["probability"].as_f64().unwrap();
    assert!((p - 41.0 / 87.0).abs() < 1e-9);
}

#[test]
fn probability_ended_game() {
    lcr()
        .args(["probability", "3", "0", "0", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100.0000%"));
}

#[test]
fn probability_winner_out_of_range() {
    lcr()
        .args(["probability", "4", "1", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("position must be between 1 and 3"));
}

#[test]
fn probability_winner_zero() {
    lcr()
        .args(["probability", "0", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn probability_no_chips() {
    lcr()
        .args(["probability", "1", "0", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn probability_state_limit() {
    lcr()
        .args(["probability", "1", "3", "3", "3", "--max-states", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("5"));
}

#[test]
fn probability_with_dice_cap() {
    lcr()
        .args(["probability", "1", "4", "1", "--dice-cap", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("approximate"));
}

#[test]
fn probability_dice_cap_zero_rejected() {
    lcr()
        .args(["probability", "1", "4", "1", "--dice-cap", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn probability_sequences_match_tallies() {
    lcr()
        .args(["probability", "1", "2", "1", "--sequences", "--serial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("47.1264%"));
}

// --- table ---

#[test]
fn table_lists_every_position() {
    lcr()
        .args(["table", "1", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Win probability"))
        .stdout(predicate::str::contains("28.8472%"))
        .stdout(predicate::str::contains("30.7257%"))
        .stdout(predicate::str::contains("40.4271%"))
        .stdout(predicate::str::contains("Total:"));
}

#[test]
fn table_json_sums_to_one() {
    let output = lcr()
        .args(["table", "2", "1", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let positions = value["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 3);
    let total: f64 = positions
        .iter()
        .map(|p| p["probability"].as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn table_explicit_turn() {
    let output = lcr()
        .args(["table", "1", "1", "1", "--turn", "2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["turn"], 2);
}

#[test]
fn table_turn_on_empty_seat() {
    lcr()
        .args(["table", "0", "1", "1", "--turn", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn table_rejects_chip_totals_beyond_u32() {
    lcr()
        .args(["table", "1", "4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("total chip count exceeds"));
}

#[test]
fn table_rejects_negative_chips() {
    lcr().args(["table", "1", "-1"]).assert().failure();
}

// --- equations ---

#[test]
fn equations_two_players() {
    lcr()
        .args(["equations", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Equations"))
        .stdout(predicate::str::contains("(1)1 ="));
}

#[test]
fn equations_json() {
    let output = lcr()
        .args(["equations", "1", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn equations_ended_game() {
    lcr()
        .args(["equations", "4", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no equations"));
}

// --- simulate ---

#[test]
fn simulate_reports_both_columns() {
    lcr()
        .args(["simulate", "1", "1", "--games", "500", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulation"))
        .stdout(predicate::str::contains("Simulated"))
        .stdout(predicate::str::contains("Exact"));
}

#[test]
fn simulate_skip_exact() {
    lcr()
        .args(["simulate", "2", "2", "--games", "200", "--skip-exact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Difference").not());
}

// --- general ---

#[test]
fn verbose_logs_to_stderr() {
    lcr()
        .args(["-vv", "table", "1", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn missing_chips_is_usage_error() {
    lcr().args(["table"]).assert().failure();
}
