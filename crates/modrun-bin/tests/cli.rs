use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::{tempdir, TempDir};

const IMPORTS: &str = r#"
  (import "env" "abort" (func $abort (param i32)))
  (import "env" "console_log_i32" (func $log_i32 (param i32)))
  (import "env" "console_log_f64" (func $log_f64 (param f64)))
"#;

fn modrun_cmd() -> Command {
    let mut cmd = Command::cargo_bin("modrun").expect("modrun binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_module(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("(module {IMPORTS} {body})")).expect("write module");
    path
}

fn abort_module(dir: &TempDir, code: i32) -> PathBuf {
    write_module(
        dir,
        &format!("abort_{code}.wat"),
        &format!(
            r#"(func (export "main") (result i32)
                i32.const {code}
                call $abort
                i32.const 0)"#
        ),
    )
}

#[test]
fn missing_argument_is_a_usage_error() {
    modrun_cmd()
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("provide the path"));
}

#[test]
fn unreadable_module_fails() {
    let dir = tempdir().expect("tempdir");
    modrun_cmd()
        .arg(dir.path().join("missing.wasm"))
        .assert()
        .code(1)
        .stderr(contains("failed to read wasm module"));
}

#[test]
fn finishing_status_zero() {
    let dir = tempdir().expect("tempdir");
    let module = write_module(&dir, "zero.wat", r#"(func (export "main") (result i32) i32.const 0)"#);
    modrun_cmd()
        .arg(&module)
        .assert()
        .success()
        .stdout("\nprogram finished with exit code: 0\n")
        .stderr(contains("ABORT").not());
}

#[test]
fn printed_values_precede_status() {
    let dir = tempdir().expect("tempdir");
    let module = write_module(
        &dir,
        "print.wat",
        r#"(func (export "main") (result i32)
            i32.const 42
            call $log_i32
            f64.const 3.5
            call $log_f64
            i32.const 0)"#,
    );
    modrun_cmd()
        .arg(&module)
        .assert()
        .success()
        .stdout("42\n3.5\n\nprogram finished with exit code: 0\n");
}

#[test]
fn abort_codes_map_to_messages_and_status() {
    let dir = tempdir().expect("tempdir");
    let cases = [
        (1, "Runtime error: division by zero."),
        (2, "Runtime error: integer overflow in addition."),
        (3, "Runtime error: recursion detected. A function cannot invoke itself."),
        (9, "Unknown error in wasm module."),
    ];
    for (code, message) in cases {
        modrun_cmd()
            .arg(abort_module(&dir, code))
            .assert()
            .code(code)
            .stdout(contains("program finished").not())
            .stderr(contains(format!("--- ABORT ---\n{message}\n-------------")));
    }
}

#[test]
fn missing_entry_point() {
    let dir = tempdir().expect("tempdir");
    let module = write_module(&dir, "noentry.wat", r#"(func (export "start") (result i32) i32.const 0)"#);
    modrun_cmd()
        .arg(&module)
        .assert()
        .code(0)
        .stdout(contains("program finished").not())
        .stderr(contains("entry point 'main' was not found"));
}

#[test]
fn exit_with_result_sets_status() {
    let dir = tempdir().expect("tempdir");
    let module = write_module(&dir, "seven.wat", r#"(func (export "main") (result i32) i32.const 7)"#);

    modrun_cmd()
        .arg(&module)
        .assert()
        .success()
        .stdout(contains("program finished with exit code: 7"));

    modrun_cmd()
        .arg("--exit-with-result")
        .arg(&module)
        .assert()
        .code(7)
        .stdout(contains("program finished with exit code: 7"));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempdir().expect("tempdir");
    let module = write_module(
        &dir,
        "repeat.wat",
        r#"(global $n (mut i32) (i32.const 0))
          (func (export "main") (result i32)
            global.get $n
            i32.const 1
            i32.add
            global.set $n
            global.get $n
            call $log_i32
            i32.const 0)"#,
    );

    let first = modrun_cmd().arg(&module).output().expect("first run");
    let second = modrun_cmd().arg(&module).output().expect("second run");
    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.stderr, second.stderr);
    assert_eq!(String::from_utf8_lossy(&first.stdout), "1\n\nprogram finished with exit code: 0\n");
}

#[test]
fn import_mismatch_fails() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("mismatch.wat");
    fs::write(
        &path,
        r#"(module
          (import "env" "console_log_i32" (func (param i64)))
          (func (export "main") (result i32) i32.const 0))"#,
    )
    .expect("write module");
    modrun_cmd()
        .arg(&path)
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("failed to instantiate the wasm module"));
}
