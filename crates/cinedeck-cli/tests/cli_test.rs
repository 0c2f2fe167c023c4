#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};

/// Command with credentials and collector settings scrubbed from the environment.
fn cinedeck(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("TMDB_API_TOKEN")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path());
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("trailer"));
}

#[test]
fn test_search_requires_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_list_rejects_unknown_category() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.args(["list", "--category", "trending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("trending"));
}

#[test]
fn test_list_help_shows_categories() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now-playing"))
        .stdout(predicate::str::contains("top-rated"));
}

#[test]
fn test_list_without_credential_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinedeck(&dir)
        .args(["list", "--category", "popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}

#[test]
fn test_blank_search_query_fails_before_network() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinedeck(&dir)
        .args(["search", "--query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_config_init_writes_defaults() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    cinedeck(&dir).args(["config", "init"]).assert().success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("language = \"en-US\""));
    assert!(written.contains("timeout_secs = 30"));
}

#[test]
fn test_config_show_redacts_secrets() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tmdb]\napi_key = \"very-secret-key\"\n",
    )
    .unwrap();

    // Act & Assert
    cinedeck(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("very-secret-key").not());
}

#[test]
fn test_details_rejects_non_numeric_id() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinedeck(&dir)
        .env("TMDB_API_KEY", "test-key")
        .args(["details", "--id", "../tv/1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid movie id"));
}
