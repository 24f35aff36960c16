// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Tests for the `chatexport` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CHAT: &str = include_str!("data/chat.txt");

fn chatexport() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chatexport"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Writes the sample transcript into a fresh directory.
fn setup(transcript: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("chat.txt");
    let output = dir.path().join("chat.json");
    fs::write(&input, transcript).unwrap();
    (dir, input, output)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn writes_json_file() {
    let (_dir, input, output) = setup(CHAT);

    chatexport()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported"));

    let doc = read_json(&output);
    assert_eq!(doc["name"], "My Conversation");
    assert_eq!(doc["messages"].as_array().unwrap().len(), 7);
    assert_eq!(doc["messages"][0]["timestamp"], 1_448_470_901);
    assert_eq!(doc["messages"][0]["senderId"], "bob");
    assert!(doc.get("activity").is_none());
}

#[test]
fn applies_filters_and_report() {
    let (_dir, input, output) = setup(CHAT);

    chatexport()
        .args(["--filter-user", "bob", "-k", "pie", "--blacklist", "pie", "--report"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let doc = read_json(&output);
    let messages = doc["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0]["content"],
        "I'm good thanks, do you like *redacted*?"
    );
    assert_eq!(
        doc["activity"],
        serde_json::json!([{"senderId": "bob", "count": 2}])
    );
}

#[test]
fn splits_comma_separated_blacklist() {
    let (_dir, input, output) = setup(CHAT);

    chatexport()
        .args(["-b", "pie, Angus", "-b", "there"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let doc = read_json(&output);
    assert_eq!(doc["messages"][0]["content"], "Hello *redacted*!");
    assert_eq!(
        doc["messages"][3]["content"],
        "no, let me ask *redacted*..."
    );
}

#[test]
fn writes_to_stdout() {
    let (_dir, input, _output) = setup(CHAT);

    chatexport()
        .arg(&input)
        .arg("-")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"name":"My Conversation""#));
}

#[test]
fn parse_error_writes_no_output() {
    let broken = CHAT.replacen("1448470910", "soon", 1);
    let (_dir, input, output) = setup(&broken);

    chatexport()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 5"))
        .stderr(predicate::str::contains("soon"));

    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("chat.json");

    chatexport()
        .arg(dir.path().join("nope.txt"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));

    assert!(!output.exists());
}

#[test]
fn refuses_to_overwrite_without_force() {
    let (_dir, input, output) = setup(CHAT);
    fs::write(&output, "keep me").unwrap();

    chatexport()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

    chatexport()
        .arg("--force")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();
    assert_eq!(read_json(&output)["name"], "My Conversation");
}

#[test]
fn requires_output_argument() {
    let (_dir, input, _output) = setup(CHAT);

    chatexport()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OUTPUT"));
}

#[test]
fn no_arguments_prints_help() {
    chatexport()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: chatexport"));
}

#[test]
fn prints_version() {
    chatexport()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
