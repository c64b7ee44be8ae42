use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn jarpub_cmd() -> Command {
    Command::cargo_bin("jarpub").unwrap()
}

#[test]
fn test_compare_orders_versions() {
    jarpub_cmd()
        .args(["compare", "1.1", "1.1.1"])
        .assert()
        .success()
        .stdout("1.1 < 1.1.1\n");

    jarpub_cmd()
        .args(["compare", "1.1-ABC", "1.1"])
        .assert()
        .success()
        .stdout("1.1-ABC > 1.1\n");
}

#[test]
fn test_compare_ignores_trailing_zeros() {
    jarpub_cmd()
        .args(["compare", "1.0", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0 = 1"));
}

#[test]
fn test_compare_rejects_blank_version() {
    jarpub_cmd()
        .args(["compare", " ", "1"])
        .assert()
        .failure();
}

#[test]
fn test_help_lists_commands() {
    jarpub_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("verify"));
}
