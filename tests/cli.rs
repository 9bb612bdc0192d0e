use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cargo_bin() -> &'static str {
    // The binary name matches the package: jsonmend
    "jsonmend"
}

const VALID: &str = "{\"ok\": true}\n";
const FIXABLE: &str = "[\n  {\n    \"a\": 1\n  }\n  }\n]\n";
const HOPELESS: &str = "{\"broken\": }\n";

#[test]
fn scan_fix_verify_scenario() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok.json"), VALID).unwrap();
    fs::write(dir.path().join("fixable.json"), FIXABLE).unwrap();
    fs::write(dir.path().join("hopeless.json"), HOPELESS).unwrap();

    Command::cargo_bin(cargo_bin())
        .unwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 file(s) with errors"))
        .stdout(predicate::str::contains("Total errors: 2"))
        .stdout(predicate::str::contains("Fixed: 1"))
        .stdout(predicate::str::contains("Failed: 1"))
        .stdout(predicate::str::contains("Remaining errors after fix: 1"));

    let repaired = fs::read_to_string(dir.path().join("fixable.json")).unwrap();
    serde_json::from_str::<serde_json::Value>(&repaired).unwrap();
    // The unrecognized corruption is reported, never guessed at.
    assert_eq!(
        fs::read_to_string(dir.path().join("hopeless.json")).unwrap(),
        HOPELESS
    );
}

#[test]
fn clean_tree_reports_zero_errors() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok.json"), VALID).unwrap();

    Command::cargo_bin(cargo_bin())
        .unwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 file(s) with errors"))
        .stdout(predicate::str::contains("Remaining errors after fix: 0"));
}

#[test]
fn dry_run_fixes_nothing_on_disk() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("fixable.json"), FIXABLE).unwrap();

    Command::cargo_bin(cargo_bin())
        .unwrap()
        .args(["--dry-run"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed: 1"))
        .stdout(predicate::str::contains("Remaining errors after fix: 1"));

    assert_eq!(
        fs::read_to_string(dir.path().join("fixable.json")).unwrap(),
        FIXABLE
    );
}

#[test]
fn keep_backup_writes_the_orig_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("fixable.json"), FIXABLE).unwrap();

    Command::cargo_bin(cargo_bin())
        .unwrap()
        .args(["--keep-backup"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed: 1"));

    assert_eq!(
        fs::read_to_string(dir.path().join("fixable.json.orig")).unwrap(),
        FIXABLE
    );
    let repaired = fs::read_to_string(dir.path().join("fixable.json")).unwrap();
    serde_json::from_str::<serde_json::Value>(&repaired).unwrap();
}

#[test]
fn report_json_emits_a_machine_readable_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok.json"), VALID).unwrap();
    fs::write(dir.path().join("fixable.json"), FIXABLE).unwrap();
    fs::write(dir.path().join("hopeless.json"), HOPELESS).unwrap();

    let assert = Command::cargo_bin(cargo_bin())
        .unwrap()
        .args(["--report-json"])
        .arg(dir.path())
        .assert()
        .success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["scanned"], 3);
    assert_eq!(v["files"].as_array().map(|f| f.len()), Some(2));
}

#[test]
fn unknown_option_is_rejected() {
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown option"));
}
