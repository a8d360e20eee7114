//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAIL_KEY: &str = "/etc/linuxmuster/ssl/mail.key.pem";

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("linuxmuster-mail"));
}

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config <FILE>"))
        .stdout(predicate::str::contains("--reboot"));
}

#[test]
fn test_no_mode_is_usage_error() {
    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_setup_without_config() {
    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.arg("--setup").assert().failure().code(2);
}

#[test]
fn test_setup_and_network_conflict() {
    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.args(["-s", "-n", "-c", "setup.ini"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_unknown_option() {
    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.arg("-x").assert().failure().code(2);
}

#[test]
fn test_missing_setup_file() {
    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.args(["--setup", "--config", "nonexistent.ini"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Setup file not found"))
        .stdout(predicate::str::contains("Script finished with error!"));
}

#[test]
fn test_missing_certificate() {
    // a provisioned appliance has the key; running there would change its owner
    if Path::new(MAIL_KEY).exists() {
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("setup.ini");
    fs::write(&config_path, "[setup]\ndomainname = linuxmuster.lan\n").unwrap();

    let mut cmd = Command::cargo_bin("linuxmuster-mail").unwrap();
    cmd.arg("--setup")
        .arg("--config")
        .arg(&config_path)
        .env("RUST_LOG", "info")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("mail.key.pem is missing!"));
}
