//! Smoke tests to verify command wiring

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn trivia(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.current_dir(config_dir.path())
        .env("TRIVIA_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

// === Help ===

#[test]
fn test_top_level_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    trivia(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    let dir = tempfile::tempdir().unwrap();
    trivia(&dir)
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_seed_help() {
    let dir = tempfile::tempdir().unwrap();
    trivia(&dir)
        .arg("seed")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}

// === Config ===

#[test]
fn test_config_path_honors_env() {
    let dir = tempfile::tempdir().unwrap();
    trivia(&dir)
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    let dir = tempfile::tempdir().unwrap();
    trivia(&dir)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:5000"))
        .stdout(predicate::str::contains("max_connections = 5"));
}

#[test]
fn test_config_show_reads_file_and_redacts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
[server]
bind = "0.0.0.0:8080"

[database]
url = "postgres://trivia:secret@db/trivia"
"#,
    )
    .unwrap();

    trivia(&dir)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:8080"))
        .stdout(predicate::str::contains("trivia:***@db"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[database]\nmax_connections = 0\n",
    )
    .unwrap();

    trivia(&dir)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_connections"));
}

// === Seed ===

#[test]
fn test_seed_without_database_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    trivia(&dir)
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}
