//
//  imgur-album-upload
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;

const CREDENTIAL_VARS: [&str; 5] = [
    "CLIENT_ID",
    "ACCESS_TOKEN",
    "MASHAPE_KEY",
    "PROXY_KEY",
    "ALBUM_UPLOAD_SECRETS",
];

fn album_upload(workdir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("album-upload").unwrap();
    cmd.current_dir(workdir);
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_directory_is_required() {
    let workdir = tempfile::tempdir().unwrap();
    album_upload(workdir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<DIRECTORY>"));
}

#[test]
fn test_help_lists_album_option() {
    let workdir = tempfile::tempdir().unwrap();
    album_upload(workdir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--album"));
}

#[test]
fn test_missing_client_id() {
    let workdir = tempfile::tempdir().unwrap();
    album_upload(workdir.path())
        .arg(workdir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("CLIENT_ID is not set"));
}

#[test]
fn test_client_id_from_secrets_file() {
    let workdir = tempfile::tempdir().unwrap();
    std::fs::write(workdir.path().join("secrets.env"), "CLIENT_ID=abc\n").unwrap();

    // The directory is listed before any request, so this never reaches the network.
    album_upload(workdir.path())
        .arg(workdir.path().join("missing"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed listing"));
}

#[test]
fn test_secrets_option() {
    let workdir = tempfile::tempdir().unwrap();
    let secrets = workdir.path().join("imgur.env");
    std::fs::write(&secrets, "CLIENT_ID=abc\n").unwrap();

    album_upload(workdir.path())
        .arg("--secrets")
        .arg(&secrets)
        .arg(workdir.path().join("missing"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed listing"));
}

#[test]
fn test_json_keeps_stdout_clean() {
    let workdir = tempfile::tempdir().unwrap();
    std::fs::write(workdir.path().join("secrets.env"), "CLIENT_ID=abc\n").unwrap();

    album_upload(workdir.path())
        .arg("--json")
        .arg(workdir.path().join("missing"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed listing"));
}
