#![allow(deprecated)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use tempfile::TempDir;

const IRODS_VARS: &[&str] = &[
    "IRODS_HOST",
    "IRODS_PORT",
    "IRODS_USER_NAME",
    "IRODS_ZONE_NAME",
    "IRODS_HTTP_API_URL",
    "IRODS_PASSWORD",
];

/// An `iquest` command isolated from the caller's iRODS environment.
fn iquest_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("iquest"));
    for var in IRODS_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home.path())
        .env("IRODS_ENVIRONMENT_FILE", home.path().join("missing.json"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_attrs_lists_names() {
    let home = TempDir::new().unwrap();
    iquest_cmd(&home)
        .arg("attrs")
        .assert()
        .success()
        .stdout(predicate::str::contains("DATA_NAME\n"))
        .stdout(predicate::str::contains("COLL_NAME\n"));
}

#[test]
fn test_attrs_json() {
    let home = TempDir::new().unwrap();
    let output = iquest_cmd(&home)
        .args(["--output", "json", "attrs"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(names.iter().any(|n| n == "USER_NAME"));
}

#[test]
fn test_missing_query_prints_usage() {
    let home = TempDir::new().unwrap();
    iquest_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("StringCondition needed"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_option() {
    let home = TempDir::new().unwrap();
    iquest_cmd(&home)
        .arg("--bogus")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Use -h for help"));
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    iquest_cmd(&home)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("no-distinct"));
}

#[test]
fn test_missing_environment() {
    let home = TempDir::new().unwrap();
    iquest_cmd(&home)
        .arg("SELECT DATA_NAME")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("irods_host"));
}

#[test]
fn test_malformed_environment_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("irods_environment.json");
    std::fs::write(&path, "{ not json").unwrap();
    iquest_cmd(&home)
        .env("IRODS_ENVIRONMENT_FILE", &path)
        .arg("SELECT DATA_NAME")
        .assert()
        .code(2);
}

#[test]
fn test_connection_refused() {
    let home = TempDir::new().unwrap();
    iquest_cmd(&home)
        .env("IRODS_HOST", "127.0.0.1")
        .env("IRODS_USER_NAME", "rods")
        .env("IRODS_ZONE_NAME", "tempZone")
        .env("IRODS_PASSWORD", "rods")
        .env("IRODS_HTTP_API_URL", "http://127.0.0.1:1/irods-http-api/0.5.0")
        .args(["--no-page", "SELECT DATA_NAME"])
        .assert()
        .code(2);
}

#[test]
fn test_connection_refused_json_envelope() {
    let home = TempDir::new().unwrap();
    let output = iquest_cmd(&home)
        .env("IRODS_HOST", "127.0.0.1")
        .env("IRODS_USER_NAME", "rods")
        .env("IRODS_ZONE_NAME", "tempZone")
        .env("IRODS_PASSWORD", "rods")
        .env("IRODS_HTTP_API_URL", "http://127.0.0.1:1/irods-http-api/0.5.0")
        .args(["--output", "json", "--sql", "ls"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let envelope: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(envelope["ok"], false);
    assert_eq!(envelope["error"]["code"], "connection_failed");
}
