use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("turtle").unwrap() }

#[test]
fn test_missing_subcommand_prints_usage() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_top_level_help_succeeds() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("check").and(predicate::str::contains("view")));
}

#[test]
fn test_subcommand_help_succeeds() {
    for sub in ["check", "run", "view"] {
        cargo_bin()
            .timeout(Duration::from_secs(2)).arg(sub).arg("--help")
            .assert()
            .success()
            .stderr(predicate::str::contains("Usage:"));
    }
}

#[test]
fn test_run_without_path_is_usage_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("run")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_missing_file_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("run").arg("/nonexistent/program.tur")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("I/O error reading /nonexistent/program.tur"));
}

#[test]
fn test_view_parse_error_before_terminal_setup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tur");
    std::fs::write(&path, "E_FWD nope!").unwrap();
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("view").arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}
