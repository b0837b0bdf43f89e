//! End-to-end checks of the `pile` binary that need no docker daemon.

use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

fn pile(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pile").unwrap();
    cmd.env("PILE_DIR", dir.path().join("pile"))
        .env_remove("PILE_LOG");
    cmd
}

#[test]
fn test_init_writes_default_files() {
    let dir = TempDir::new().unwrap();

    let output = pile(&dir).arg("init").output().unwrap();

    assert!(output.status.success());
    let pile_dir = dir.path().join("pile");
    let config = fs::read_to_string(pile_dir.join("pile.config.yaml")).unwrap();
    assert!(config.contains("open-webui"));
    let network = fs::read_to_string(pile_dir.join("pile.network.yaml")).unwrap();
    assert!(network.contains("driver: bridge"));
}

#[test]
fn test_logs_without_name_prints_usage() {
    let dir = TempDir::new().unwrap();

    let output = pile(&dir).arg("logs").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please specify an app name"));
}

#[test]
fn test_install_without_name_prints_usage() {
    let dir = TempDir::new().unwrap();

    let output = pile(&dir).arg("install").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please specify a pile to install"));
    assert!(!dir.path().join("pile").exists());
}

#[test]
fn test_up_without_config_reports_error() {
    let dir = TempDir::new().unwrap();

    let output = pile(&dir).arg("up").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pile init"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();

    let output = pile(&dir).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["init", "up", "down", "install", "logs", "logs-db", "status", "ports"] {
        assert!(stdout.contains(name), "help is missing {name}");
    }
}

#[test]
fn test_shortcuts_do_not_need_pile_dir() {
    let dir = TempDir::new().unwrap();

    let output = pile(&dir)
        .env_remove("PILE_DIR")
        .env_remove("HOME")
        .arg("logs-db")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please specify a database name"));
}
