use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("turtle").unwrap();
    cmd.env("TURTLE_CONFIG", "/nonexistent/turtle.toml").env_remove("RUST_LOG");
    cmd
}

fn program_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn check_lists_instructions() {
    let tf = program_file("E_ROR\nE_FWD E_SET\n");
    cargo_bin()
        .arg("check").arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("   0  E_ROR")
            .and(predicate::str::contains("   2  E_SET"))
            .and(predicate::str::contains("   3  E_END"))
            .and(predicate::str::contains("ok (4 instructions)")))
        .stderr(predicate::str::is_empty());
}

#[test]
fn check_empty_file_is_just_end() {
    let tf = program_file("  \n");
    cargo_bin()
        .arg("check").arg("--file").arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (1 instructions)"));
}

#[test]
fn check_quiet_prints_nothing() {
    let tf = program_file("E_CLR");
    cargo_bin()
        .arg("check").arg("-q").arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn check_reports_parse_error_with_caret() {
    let tf = program_file("E_SET\nE_FWD E_JMP\n");
    cargo_bin()
        .arg("check").arg(tf.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parse error: unrecognized instruction 'E_JMP'")
            .and(predicate::str::contains("at offset 12"))
            .and(predicate::str::contains("  E_FWD E_JMP\n        ^")));
}

#[test]
fn check_reports_short_trailing_token() {
    let tf = program_file("E_SET E_");
    cargo_bin()
        .arg("check").arg(tf.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}
