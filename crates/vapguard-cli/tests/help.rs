use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the vapguard binary.
#[allow(deprecated)]
fn vapguard_cmd() -> Command {
    Command::cargo_bin("vapguard").unwrap()
}

#[test]
fn help_works() {
    vapguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn validate_help_lists_path_flags() {
    vapguard_cmd()
        .args(["validate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--targets"))
        .stdout(predicate::str::contains("--policies"));
}

#[test]
fn version_prints_tool_name() {
    vapguard_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("vapguard "));
}
