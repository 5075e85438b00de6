use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cmd() -> Command {
    cargo_bin_cmd!("llm-tester")
}

#[test]
fn test_help_lists_options() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--credentials"))
        .stdout(predicate::str::contains("--appearance"))
        .stdout(predicate::str::contains("--theme"))
        .stdout(predicate::str::contains("--completions"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_for_bash() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("llm-tester"));
}

#[test]
fn test_invalid_appearance_rejected() {
    cmd()
        .args(["--appearance", "sepia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_theme_rejected() {
    cmd()
        .args(["--theme", "purple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible values"));
}

#[test]
fn test_missing_config_file_fails_before_ui() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["--config", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
