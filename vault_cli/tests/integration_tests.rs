//! Integration tests for the ironvault binary.
//!
//! These tests verify end-to-end behavior including:
//! - Playlist generation and history annotation
//! - Interactive session logging over stdin
//! - Calculators and the guide
//! - Configuration overrides

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a test data directory with an empty config file
fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config");
    temp_dir
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ironvault"))
}

/// CLI pointed at an isolated data directory and config
fn cli_in(dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir")
        .arg(data_dir(dir))
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

fn data_dir(dir: &Path) -> PathBuf {
    dir.join("data")
}

fn log_path(dir: &Path) -> PathBuf {
    data_dir(dir).join("iron_vault_log.csv")
}

fn generate_json(dir: &Path, mode: &str) -> Vec<Value> {
    let output = cli_in(dir)
        .args(["generate", mode, "--json"])
        .output()
        .expect("Failed to run generate");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON");
    parsed.as_array().expect("Expected array").clone()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout generator and set tracker"));
}

#[test]
fn test_modes_grouped_by_family() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("modes")
        .assert()
        .success()
        .stdout(predicate::str::contains("PHAT SYSTEM"))
        .stdout(predicate::str::contains("Upper Power"))
        .stdout(predicate::str::contains("CONDITIONING"))
        .stdout(predicate::str::contains("Tabata (4 mins)"));
}

#[test]
fn test_generate_initializes_log_with_header() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["generate", "Upper Power"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press"));

    let contents = fs::read_to_string(log_path(temp_dir.path())).expect("Failed to read log");
    assert_eq!(contents, "Date,Exercise,Weight,Reps,1RM\n");
}

#[test]
fn test_generate_json_starts_with_warmups() {
    let temp_dir = setup_test_dir();
    let playlist = generate_json(temp_dir.path(), "Upper Power");

    // 2 warm-ups + 5 slots + cool-down
    assert_eq!(playlist.len(), 8);
    assert_eq!(playlist[0]["name"], "Arm Circles");
    assert_eq!(playlist[1]["name"], "Band Pulls");
    for item in &playlist[..2] {
        assert_eq!(item["category"], "WARMUP");
        assert_eq!(item["history"], "-");
    }
    assert_eq!(playlist[2]["name"], "Bench Press");
    assert_eq!(playlist[2]["history"], "new");
    assert_eq!(playlist[7]["category"], "COOLDOWN");
}

#[test]
fn test_generate_exempt_mode_has_no_bookends() {
    let temp_dir = setup_test_dir();
    let playlist = generate_json(temp_dir.path(), "HIIT");

    let names: Vec<_> = playlist.iter().map(|i| i["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Burpees", "Box Jumps", "Mtn Climbers"]);
    assert!(playlist.iter().all(|i| i["cue"] == "Form focus."));
}

#[test]
fn test_mode_name_is_case_insensitive_on_cli() {
    let temp_dir = setup_test_dir();
    let playlist = generate_json(temp_dir.path(), "lower power");
    assert_eq!(playlist[2]["name"], "Squat");
}

#[test]
fn test_unknown_mode_prints_bookends_only() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args(["generate", "Leg Day Deluxe", "--json"])
        .output()
        .expect("Failed to run generate");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown mode"));

    let playlist: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(playlist.as_array().unwrap().len(), 3);
}

#[test]
fn test_unknown_exempt_name_prints_nothing() {
    let temp_dir = setup_test_dir();

    // "Mobility" is a family and skips bookends, but is not a mode
    let output = cli_in(temp_dir.path())
        .args(["generate", "Mobility", "--json"])
        .output()
        .expect("Failed to run generate");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown mode: Mobility. Nothing to show."));
    assert!(!stderr.contains("warm-up"));

    let playlist: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(playlist.as_array().unwrap().is_empty());
}

#[test]
fn test_session_logs_sets_and_updates_history() {
    let temp_dir = setup_test_dir();

    // Arm Circles, Band Pulls, Barbell Bench, Inc DB Press, Weighted Dips,
    // Cable Flys, Pushups, Cool Down Walk
    cli_in(temp_dir.path())
        .args(["start", "Chest Focus"])
        .write_stdin("\n\n100 5\n30 10\n\n\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Barbell Bench 100kg x 5 (est. 1RM 116)"))
        .stdout(predicate::str::contains("Session complete"))
        .stdout(predicate::str::contains("Sets logged: 2"))
        .stdout(predicate::str::contains("Tonnage: 800 kg"));

    let contents = fs::read_to_string(log_path(temp_dir.path())).unwrap();
    let rows: Vec<_> = contents.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].ends_with(",Barbell Bench,100,5,116"));
    assert!(rows[2].ends_with(",Inc DB Press,30,10,40"));

    let playlist = generate_json(temp_dir.path(), "Chest Focus");
    assert_eq!(playlist[2]["history"], "last: 100kg x 5");
    assert_eq!(playlist[3]["history"], "last: 30kg x 10");
    assert_eq!(playlist[4]["history"], "new");
}

#[test]
fn test_session_shows_rest_timer() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["start", "HIIT"])
        .write_stdin("\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("REST: 90s"))
        .stdout(predicate::str::contains("Session complete"));
}

#[test]
fn test_quit_exits_early_without_logging() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["start", "Upper Power"])
        .write_stdin("\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session exited"))
        .stdout(predicate::str::contains("Session complete").not());

    let contents = fs::read_to_string(log_path(temp_dir.path())).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn test_end_of_input_ends_session() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["start", "Back Focus"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session ended"));
}

#[test]
fn test_history_command() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["history", "Squat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat: new"));

    cli_in(temp_dir.path())
        .args(["start", "Squat Primer"])
        .write_stdin("20 10\n\n\n")
        .assert()
        .success();

    cli_in(temp_dir.path())
        .args(["history", "90/90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("90/90: last: 20kg x 10"));

    cli_in(temp_dir.path())
        .args(["history", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("90/90"));
}

#[test]
fn test_plate_calculator() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["plates", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load: side: 25, 15"));

    cli_in(temp_dir.path())
        .args(["plates", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load: bar only"));

    cli_in(temp_dir.path())
        .args(["plates", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load: invalid"));
}

#[test]
fn test_one_rep_max() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["one-rm", "100", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated 1RM: 133 kg"));

    cli_in(temp_dir.path())
        .args(["one-rm", "abc", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated 1RM: 0 kg"));
}

#[test]
fn test_config_overrides() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[generation]
cool_down = false

[session]
rest_seconds = 45

[plates]
bar_kg = 15.0
"#,
    )
    .unwrap();

    let playlist = generate_json(temp_dir.path(), "Chest Focus");
    assert_eq!(playlist.len(), 7);

    cli_in(temp_dir.path())
        .args(["plates", "35"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load: side: 10"));

    cli_in(temp_dir.path())
        .args(["start", "Tabata (4 mins)"])
        .write_stdin("\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("REST: 45s"));
}

#[test]
fn test_guide() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("guide")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. The Iron Philosophy"))
        .stdout(predicate::str::contains("8. Injury Protocol"));
}

#[test]
fn test_guide_json() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args(["guide", "--json"])
        .output()
        .expect("Failed to run guide");
    assert!(output.status.success());

    let chapters: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON");
    let chapters = chapters.as_array().expect("Expected array");
    assert_eq!(chapters.len(), 8);
    assert_eq!(chapters[0]["title"], "1. The Iron Philosophy");
    assert_eq!(chapters[7]["subtitle"], "GOOD PAIN VS BAD PAIN");
}
