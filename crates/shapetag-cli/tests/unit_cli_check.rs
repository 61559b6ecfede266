//! End-to-end runs of the `shapetag` binary
//!
//! Each test works in its own temporary directory with the config search
//! paths and logging environment pinned, so a developer's own config files
//! cannot leak in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("fixture is written");
}

fn shapetag(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shapetag"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("SHAPETAG_CONFIG")
        .env_remove("SHAPETAG_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .expect("shapetag executes")
}

#[test]
fn unknown_tag_on_present_field_stops_with_status_one() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(&dir, "flags.json", r#"{"flags": [true]}"#);
    write(&dir, "decl.json", r#"{"flags": "list_of_bool"}"#);

    let output = shapetag(dir.path(), &["--no-color", "check", "flags.json", "--decl", "decl.json"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr is utf8");
    assert!(
        stderr.contains("Unknown data type for check 'list_of_bool' -> STOP"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn unknown_tag_on_absent_field_is_never_looked_up() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(&dir, "params.json", r#"{"name": "ok"}"#);
    write(&dir, "decl.json", r#"{"name": "str", "flags": "list_of_bool"}"#);

    let output = shapetag(dir.path(), &["--quiet", "check", "params.json", "--decl", "decl.json"]);

    assert!(output.status.success(), "check should pass: {:?}", output);
}

#[test]
fn failing_records_exit_with_status_two_and_json_reports() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(&dir, "eco.yaml", "- years: [2025, 2030]\n- years: [2025, '2030']\n");
    write(&dir, "decl.yaml", "years: list_of_int\n");

    let output = shapetag(
        dir.path(),
        &["-o", "json", "check", "eco.yaml", "--decl", "decl.yaml"],
    );

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    assert_eq!(stdout.trim(), r#"[{"label":"eco[1]","fields":["years"]}]"#);
}
