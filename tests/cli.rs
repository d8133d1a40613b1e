//
//  smartling-files
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `sl` with credentials from the environment and an isolated config file.
fn sl(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sl").unwrap();
    cmd.env("SL_CONFIG", temp.path().join("config.toml"))
        .env("SL_USER_IDENTIFIER", "user")
        .env("SL_USER_SECRET", "secret")
        .env("SL_PROJECT_ID", "proj")
        .env("SL_HOST", "http://127.0.0.1:9")
        .env_remove("SL_DEBUG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    sl(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("upload")
                .and(predicate::str::contains("get-multiple"))
                .and(predicate::str::contains("last-modified"))
                .and(predicate::str::contains("locales")),
        );
}

#[test]
fn test_invalid_retrieval_type_is_usage_error() {
    let temp = TempDir::new().unwrap();
    sl(&temp)
        .args(["get", "a.json", "fr-FR", "--retrieval-type", "draft"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("retrievalType"));
}

#[test]
fn test_missing_upload_file_is_file_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.json");
    sl(&temp)
        .args(["upload", missing.to_str().unwrap(), "--type", "json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_missing_credentials() {
    let temp = TempDir::new().unwrap();
    sl(&temp)
        .env_remove("SL_USER_SECRET")
        .args(["list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("user_secret"));
}

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();
    sl(&temp)
        .args(["config", "set", "timeout_secs", "15"])
        .assert()
        .success();

    sl(&temp)
        .args(["config", "get", "timeout_secs"])
        .assert()
        .success()
        .stdout("15\n");

    sl(&temp)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}
