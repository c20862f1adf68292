//! Integration tests for the `wadocr` binary

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("wadocr");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("wadocr "));
}

#[test]
fn test_missing_arguments_fail() {
    let mut cmd = cargo_bin_cmd!("wadocr");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_missing_config_file_fails() {
    let data = tempfile::tempdir().unwrap();
    std::fs::write(data.path().join("0.dcm"), b"not dicom").unwrap();

    let mut cmd = cargo_bin_cmd!("wadocr");
    cmd.args(["-d"])
        .arg(data.path())
        .args(["-c", "/nonexistent/config.json", "-r", "results.json"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unknown_action_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{ "actions": { "qc_struct": { "params": {} } } }"#,
    )
    .unwrap();
    let data = dir.path().join("study");
    std::fs::create_dir(&data).unwrap();
    std::fs::write(data.join("0.dcm"), b"not dicom").unwrap();

    let mut cmd = cargo_bin_cmd!("wadocr");
    cmd.arg("-d")
        .arg(&data)
        .arg("-c")
        .arg(&config)
        .arg("-r")
        .arg(dir.path().join("results.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}

#[test]
fn test_empty_study_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{ "actions": {} }"#).unwrap();
    let data = dir.path().join("study");
    std::fs::create_dir(&data).unwrap();

    let mut cmd = cargo_bin_cmd!("wadocr");
    cmd.arg("-d")
        .arg(&data)
        .arg("-c")
        .arg(&config)
        .arg("-r")
        .arg(dir.path().join("results.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no series files"));
}

#[test]
fn test_non_dicom_acqdatetime_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{ "actions": { "acqdatetime": { "params": {} } } }"#,
    )
    .unwrap();
    let data = dir.path().join("study");
    std::fs::create_dir(&data).unwrap();
    std::fs::write(data.join("0.dcm"), b"definitely not dicom").unwrap();

    let mut cmd = cargo_bin_cmd!("wadocr");
    cmd.arg("-d")
        .arg(&data)
        .arg("-c")
        .arg(&config)
        .arg("-r")
        .arg(dir.path().join("results.json"));

    cmd.assert().failure().stderr(predicate::str::contains("Error:"));
}
