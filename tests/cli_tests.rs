//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use similar_asserts::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCORES_CONFIG: &str = "\
sources:
  scoresA_*.csv:
    username: User
    value: Pts
    caption: A
  scoresB_*.csv:
    username: User
    value: Pts
    caption: B
patch: patch_*.csv
";

fn csv_merge() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("csv-merge"))
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write fixture");
}

fn scores_fixture() -> TempDir {
    let tmp = TempDir::new().expect("tmp");
    write(tmp.path(), "config.yaml", SCORES_CONFIG);
    write(tmp.path(), "scoresA_1.csv", "User,Pts\nalice,10\nbob,5");
    write(tmp.path(), "scoresB_1.csv", "User,Pts\nalice,20");
    write(tmp.path(), "patch_1.csv", "Username,Caption,Value\nbob,B,99");
    tmp
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run csv-merge");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn test_cli_version() {
    let mut cmd = csv_merge();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("csv-merge"));
}

#[test]
fn test_cli_help() {
    let mut cmd = csv_merge();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Merge the most recent CSV snapshots"))
        .stdout(predicate::str::contains("sources"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--patch"));
}

#[test]
fn test_merges_sources_and_applies_patch() {
    let tmp = scores_fixture();
    let out = stdout_of(csv_merge().current_dir(tmp.path()));
    assert_eq!(out, "Username,A,B\nalice,10,20\nbob,5,99\n");
}

#[test]
fn test_latest_snapshot_is_used() {
    let tmp = scores_fixture();
    write(tmp.path(), "scoresA_2.csv", "User,Pts\nbob,6\ncarol,1\n");

    let out = stdout_of(csv_merge().current_dir(tmp.path()));
    assert_eq!(out, "Username,A,B\nbob,6,99\ncarol,1,\nalice,,20\n");
}

#[test]
fn test_missing_source_is_not_an_error() {
    let tmp = scores_fixture();
    fs::remove_file(tmp.path().join("scoresA_1.csv")).expect("rm");

    let out = stdout_of(csv_merge().current_dir(tmp.path()));
    assert_eq!(out, "Username,B\nalice,20\nbob,99\n");
}

#[test]
fn test_patch_override_on_command_line() {
    let tmp = scores_fixture();
    write(tmp.path(), "fixes/manual.csv", "Username,Caption,Value\nalice,A,0\n");

    let out = stdout_of(csv_merge().current_dir(tmp.path()).args(["-p", "fixes/*.csv"]));
    assert_eq!(out, "Username,A,B\nalice,0,20\nbob,5,\n");
}

#[test]
fn test_base_dir_and_generated_captions() {
    let tmp = TempDir::new().expect("tmp");
    write(
        tmp.path(),
        "job.yaml",
        "defaults:\n  username: NetID\n  value: Grade\n  path: exports\nsources:\n  hw1_*.csv:\n  quiz_*.csv:\n  hw2_*.csv:\noutput:\n  username: Student\n",
    );
    write(tmp.path(), "exports/hw1_2021-01-10.csv", "NetID,Grade\n# late submissions below\nab12,A\n");
    write(tmp.path(), "exports/hw2_2021-02-10.csv", "NetID,Grade\ncd34,B\nab12,C\n");

    let out = stdout_of(csv_merge().current_dir(tmp.path()).args(["-y", "job.yaml"]));
    assert_eq!(out, "Student,Header100,Header200\nab12,A,C\ncd34,,B\n");
}

#[test]
fn test_output_file_option() {
    let tmp = scores_fixture();
    csv_merge()
        .current_dir(tmp.path())
        .args(["-o", "merged.csv"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(tmp.path().join("merged.csv")).expect("read output");
    assert_eq!(written, "Username,A,B\nalice,10,20\nbob,5,99\n");
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().expect("tmp");
    csv_merge()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Configuration file does not exist"));
}

#[test]
fn test_missing_column_aborts_without_output() {
    let tmp = scores_fixture();
    write(tmp.path(), "scoresB_1.csv", "Login,Pts\nalice,20\n");

    csv_merge()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("scoresB_1.csv"))
        .stderr(predicate::str::contains("username column 'User' not found"));
}

#[test]
fn test_malformed_quoting_aborts_without_output() {
    let tmp = scores_fixture();
    write(tmp.path(), "scoresA_1.csv", "User,Pts\nalice,\"10\n");

    csv_merge()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unexpected end of data"));
}

#[test]
fn test_quoted_values_are_unescaped() {
    let tmp = scores_fixture();
    write(tmp.path(), "scoresA_1.csv", "User,Pts\n\"o\"\"neil\",\"C:\\scores\"\n   ,3\n");

    let out = stdout_of(csv_merge().current_dir(tmp.path()));
    assert_eq!(out, "Username,A,B\no\"neil,C:\\scores,\nalice,,20\nbob,,99\n");
}

#[test]
fn test_sources_command_shows_resolution() {
    let tmp = scores_fixture();
    write(tmp.path(), "scoresB_0.csv", "User,Pts\n");

    csv_merge()
        .current_dir(tmp.path())
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] scoresA_*.csv -> scoresA_1.csv"))
        .stdout(predicate::str::contains("[2] scoresB_*.csv -> scoresB_1.csv"))
        .stdout(predicate::str::contains("Patch: patch_*.csv -> patch_1.csv"))
        .stdout(predicate::str::contains("Output columns: Username,A,B"));
}

#[test]
fn test_sources_command_reports_unmatched_patterns() {
    let tmp = scores_fixture();
    fs::remove_file(tmp.path().join("scoresA_1.csv")).expect("rm");
    fs::remove_file(tmp.path().join("patch_1.csv")).expect("rm");

    csv_merge()
        .current_dir(tmp.path())
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("[-] scoresA_*.csv -> no match"))
        .stdout(predicate::str::contains("[1] scoresB_*.csv -> scoresB_1.csv"))
        .stdout(predicate::str::contains("Patch: patch_*.csv -> no match"))
        .stdout(predicate::str::contains("Output columns: Username,B"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let tmp = scores_fixture();
    csv_merge()
        .current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Username,A,B\n"))
        .stderr(predicate::str::contains("Patched bob / B"));
}

#[test]
fn test_rust_log_sets_level_without_verbose() {
    let tmp = scores_fixture();
    fs::remove_file(tmp.path().join("scoresA_1.csv")).expect("rm");

    csv_merge()
        .current_dir(tmp.path())
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Username,B\n"))
        .stderr(predicate::str::contains("Merged 1 source(s), 1 skipped"))
        .stderr(predicate::str::contains("No files matched: scoresA_*.csv"))
        .stderr(predicate::str::contains("DEBUG").not());
}

#[test]
fn test_default_level_hides_info() {
    let tmp = scores_fixture();
    csv_merge()
        .current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Merged").not());
}
