//! CLI scenarios against the built binary
//!
//! These spawn the actual executable and validate the user-visible
//! contract: exit codes, success messages on stdout, errors and usage
//! hints on stderr.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, TempDir};

fn run_jyt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jyt"))
        .args(args)
        .output()
        .expect("Failed to execute jyt")
}

fn run_jyt_with_stdin(args: &[&str], stdin_data: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jyt"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn jyt");

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(stdin_data.as_bytes())
            .expect("Failed to write to stdin");
    }

    child.wait_with_output().expect("Failed to wait on child")
}

fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn converts_yaml_file_to_js_by_default() {
    let dir = tempdir().unwrap();
    let input = create_test_file(&dir, "in.yaml", "foo: bar\n");

    let output = run_jyt(&[input.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("in.js"), "stdout was: {}", stdout);

    let written = fs::read_to_string(dir.path().join("in.js")).unwrap();
    assert!(written.contains("module.exports"));
    assert!(written.contains("foo: 'bar'"));
}

#[test]
fn explicit_output_file_and_target() {
    let dir = tempdir().unwrap();
    let input = create_test_file(&dir, "in.yaml", "foo: bar\n");
    let out = dir.path().join("data.json");

    let output = run_jyt(&[input.to_str().unwrap(), out.to_str().unwrap()]);
    assert!(output.status.success());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"foo": "bar"}));
}

#[test]
fn stdin_to_stdout_conversion() {
    let output = run_jyt_with_stdin(&["-o", "yaml", "-t", "json"], "foo: bar\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value, serde_json::json!({"foo": "bar"}));
}

#[test]
fn missing_input_file_fails_with_usage_hint() {
    let output = run_jyt(&["definitely-not-here.yaml"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr was: {}", stderr);
    assert!(stderr.contains("--help"), "stderr was: {}", stderr);
}

#[test]
fn invalid_export_identifier_is_rejected() {
    let dir = tempdir().unwrap();
    let input = create_test_file(&dir, "in.yaml", "foo: bar\n");

    let output = run_jyt(&[input.to_str().unwrap(), "-x", "123bad"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("identifier"), "stderr was: {}", stderr);
}

#[test]
fn indent_out_of_bounds_is_rejected() {
    let dir = tempdir().unwrap();
    let input = create_test_file(&dir, "in.yaml", "foo: bar\n");

    let output = run_jyt(&[input.to_str().unwrap(), "-i", "9"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("indent"), "stderr was: {}", stderr);
}

#[test]
fn force_flag_overwrites_existing_output() {
    let dir = tempdir().unwrap();
    let input = create_test_file(&dir, "in.json", r#"{"v": 2}"#);
    let out = create_test_file(&dir, "out.yaml", "v: 1\n");

    let output = run_jyt(&[input.to_str().unwrap(), out.to_str().unwrap(), "--force"]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&out).unwrap(), "v: 2\n");

    // without --force a suffixed sibling appears instead
    let output = run_jyt(&[input.to_str().unwrap(), out.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(dir.path().join("out(1).yaml").exists());
    assert_eq!(fs::read_to_string(&out).unwrap(), "v: 2\n");
}

#[test]
fn js_output_style_flags() {
    let dir = tempdir().unwrap();
    let input = create_test_file(&dir, "in.yaml", "foo: bar\n");
    let out = dir.path().join("out.js");

    let output = run_jyt(&[
        input.to_str().unwrap(),
        out.to_str().unwrap(),
        "--strict",
        "--es-module",
        "--double-quote",
        "-x",
        "config",
    ]);
    assert!(output.status.success());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"use strict\";"), "was: {}", written);
    assert!(written.contains("export const config ="), "was: {}", written);
    assert!(written.contains("foo: \"bar\""), "was: {}", written);
}

#[test]
fn help_text_mentions_every_option() {
    let output = run_jyt(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--origin",
        "--target",
        "--indent",
        "--force",
        "--imports",
        "--exports",
        "--strict",
        "--es-module",
        "--double-quote",
    ] {
        assert!(stdout.contains(flag), "help is missing {}", flag);
    }
}
