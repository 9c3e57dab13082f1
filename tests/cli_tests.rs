//! End-to-end tests driving the `yptr` binary.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const DEPLOYMENT: &str = "kind: Deployment
spec:
  containers:
  - name: app
    image: nginx
  - name: sidecar
    image: mysidecar
";

/// Runs yptr with HOME pointed at `home` so no user config is picked up.
fn yptr(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yptr"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run yptr")
}

fn setup() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deploy.yaml");
    fs::write(&path, DEPLOYMENT).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_find_prints_scalar() {
    let (dir, file) = setup();
    let out = yptr(dir.path(), &["find", &file, "/spec/containers/~{name: sidecar}/image"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "mysidecar\n");
}

#[test]
fn test_find_with_position() {
    let (dir, file) = setup();
    let out = yptr(dir.path(), &["find", "--position", &file, "/spec/containers/0/image"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "5:12 nginx\n");
}

#[test]
fn test_find_all_as_json() {
    let (dir, file) = setup();
    let out = yptr(dir.path(), &["find", "--all", "--json", &file, "/spec/containers/~{}/name"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value, serde_json::json!(["app", "sidecar"]));
}

#[test]
fn test_find_missing_fails() {
    let (dir, file) = setup();
    let out = yptr(dir.path(), &["find", &file, "/spec/replicas"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
}

#[test]
fn test_insert_prints_result() {
    let (dir, file) = setup();
    let out = yptr(
        dir.path(),
        &["--indent", "2", "insert", &file, "/spec/containers/~{name: app}/ports", "[80]"],
    );
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "kind: Deployment\nspec:\n  containers:\n    - name: app\n      image: nginx\n      ports: [80]\n    - name: sidecar\n      image: mysidecar\n"
    );
    // Source file untouched without --in-place.
    assert_eq!(fs::read_to_string(&file).unwrap(), DEPLOYMENT);
}

#[test]
fn test_insert_in_place() {
    let (dir, file) = setup();
    let out = yptr(dir.path(), &["insert", "--in-place", &file, "/metadata/name", "web"]);
    assert!(out.status.success());

    let check = yptr(dir.path(), &["find", &file, "/metadata/name"]);
    assert_eq!(stdout(&check), "web\n");
}

#[test]
fn test_insert_in_place_keeps_every_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stream.yaml");
    fs::write(&path, "kind: Service\n---\nkind: Deployment\nspec: {}\n").unwrap();
    let file = path.to_str().unwrap();

    let out = yptr(dir.path(), &["insert", "--in-place", file, "/metadata/name", "web"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "kind: Service\nmetadata:\n    name: web\n---\nkind: Deployment\nspec: {}\n"
    );
}

#[test]
fn test_insert_to_output_file() {
    let (dir, file) = setup();
    let target = dir.path().join("out.yaml");
    let out = yptr(
        dir.path(),
        &["insert", &file, "/spec/containers/-", "{name: extra}", "--output", target.to_str().unwrap()],
    );
    assert!(out.status.success());
    let written = fs::read_to_string(&target).unwrap();
    assert!(written.ends_with("    - {name: extra}\n"), "{}", written);
}

#[test]
fn test_insert_error_exit_code() {
    let (dir, file) = setup();
    let out = yptr(dir.path(), &["insert", &file, "/kind", "other"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot insert node type"));
}

#[test]
fn test_find_from_stdin() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_yptr"))
        .args(["find", "-", "/a/1"])
        .env("HOME", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"a: [x, y]\n").unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(stdout(&out), "y\n");
}

#[test]
fn test_validate() {
    let dir = TempDir::new().unwrap();
    assert!(yptr(dir.path(), &["validate", "/a/~{b: c}/0"]).status.success());
    assert!(yptr(dir.path(), &["validate", ""]).status.success());
    assert!(!yptr(dir.path(), &["validate", "a/b"]).status.success());
}
