// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tally(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tally").expect("tally binary");
    cmd.env("TALLY_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn stored(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join("tallyCounters.json")).expect("stored counters");
    serde_json::from_str(&raw).expect("json")
}

fn only_id(dir: &Path) -> String {
    stored(dir)[0]["id"].as_str().expect("id").to_owned()
}

#[test]
fn empty_sheet_shows_empty_state() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No counters yet"));
}

#[test]
fn counters_persist_across_invocations() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path())
        .args(["add", "  Bier  ", "--color", "green"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Bier (Green)"));
    let id = only_id(dir.path());

    for _ in 0..6 {
        tally(dir.path()).args(["inc", &id]).assert().success();
    }
    tally(dir.path())
        .args(["inc", &id, "--paid", "--by", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bezahlt: 2"));

    let value = stored(dir.path());
    assert_eq!(value[0]["name"], "Bier");
    assert_eq!(value[0]["count1"], 6);
    assert_eq!(value[0]["count2"], 2);
    assert_eq!(value[0]["color"], "#10b981");

    tally(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("6  ||||/ |"))
        .stdout(predicate::str::contains("Total Count: 8"));
    tally(dir.path())
        .arg("total")
        .assert()
        .success()
        .stdout(predicate::str::diff("8\n"));
}

#[test]
fn legacy_file_is_migrated_when_listed() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("tallyCounters.json"),
        r##"[{"id":"a","name":"x","count":7,"color":"#000"}]"##,
    )
    .expect("seed");

    let output = tally(dir.path())
        .args(["list", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        listed,
        serde_json::json!([{"id":"a","name":"x","count1":7,"count2":0,"color":"#000"}])
    );
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("tallyCounters.json"), "{{ not json").expect("seed");
    tally(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No counters yet"));
}

#[test]
fn unknown_id_fails_without_writing() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path())
        .args(["inc", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no counter with id ghost"));
    assert!(!dir.path().join("tallyCounters.json").exists());
}

#[test]
fn blank_name_is_refused() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path()).args(["add", "   "]).assert().failure();
    assert!(!dir.path().join("tallyCounters.json").exists());
}

#[test]
fn remove_needs_yes_then_deletes() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path()).args(["add", "Wein"]).assert().success();
    let id = only_id(dir.path());

    tally(dir.path())
        .args(["remove", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(stored(dir.path()).as_array().map(Vec::len), Some(1));

    tally(dir.path()).args(["remove", &id, "--yes"]).assert().success();
    assert_eq!(stored(dir.path()), serde_json::json!([]));
}

#[test]
fn recolor_and_reset_keep_id() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path()).args(["add", "Saft"]).assert().success();
    let id = only_id(dir.path());
    tally(dir.path()).args(["inc", &id, "--by", "3"]).assert().success();
    tally(dir.path()).args(["recolor", &id, "#8b5cf6"]).assert().success();
    tally(dir.path()).args(["reset", &id]).assert().success();

    let value = stored(dir.path());
    assert_eq!(value[0]["id"], id.as_str());
    assert_eq!(value[0]["color"], "#8b5cf6");
    assert_eq!(value[0]["count1"], 0);
}

#[test]
fn preferred_color_applies_to_new_counters() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path())
        .args(["prefs", "--default-color", "teal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Teal (#14b8a6)"));
    tally(dir.path()).args(["add", "Cola"]).assert().success();
    assert_eq!(stored(dir.path())[0]["color"], "#14b8a6");
}

#[test]
fn marks_are_drawn_in_gates_of_five() {
    let dir = TempDir::new().expect("tempdir");
    tally(dir.path())
        .args(["marks", "12"])
        .assert()
        .success()
        .stdout(predicate::str::diff("||||/ ||||/ ||\n"));
    tally(dir.path())
        .args(["marks", "0"])
        .assert()
        .success()
        .stdout(predicate::str::diff("No marks\n"));
}
