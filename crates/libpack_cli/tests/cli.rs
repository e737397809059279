use std::{fs, path::Path, process::Command};

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn project() -> tempfile::TempDir {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  fs::create_dir_all(root.join("src")).unwrap();
  fs::write(
    root.join("src/index.js"),
    "import { ref } from 'vue';\nexport const counter = () => ref(0);\n",
  )
  .unwrap();
  dir
}

fn libpack(cwd: &Path) -> Command {
  let mut cmd = Command::cargo_bin("libpack").unwrap();
  cmd.current_dir(cwd);
  cmd
}

#[test]
fn builds_from_config_file() {
  let dir = project();
  fs::write(
    dir.path().join("libpack.config.json"),
    r#"{
      "entry": "src/index.js",
      "libraryName": "counter",
      "formats": ["es", "umd"],
      "external": ["vue"],
      "globals": { "vue": "Vue" }
    }"#,
  )
  .unwrap();

  libpack(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("counter.es.js"))
    .stdout(predicate::str::contains("counter.umd.js"));

  assert!(dir.path().join("dist/counter.es.js").exists());
  assert!(dir.path().join("dist/counter.umd.js").exists());
}

#[test]
fn flags_without_config_file() {
  let dir = project();

  libpack(dir.path())
    .args(["--entry", "src/index.js", "--name", "Counter", "--format", "iife"])
    .args(["--external", "vue", "--global", "vue=Vue", "--out-dir", "build", "--silent"])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let code = fs::read_to_string(dir.path().join("build/Counter.iife.js")).unwrap();
  assert!(code.starts_with("var Counter = (function (exports, __external_0) {"));
}

#[test]
fn missing_global_fails_with_configuration_stage() {
  let dir = project();

  libpack(dir.path())
    .args(["--entry", "src/index.js", "--name", "counter", "--external", "vue"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("[configuration]"))
    .stderr(predicate::str::contains("\"vue\""));

  assert!(!dir.path().join("dist").exists());
}

#[test]
fn unknown_format_is_rejected() {
  let dir = project();

  libpack(dir.path())
    .args(["--entry", "src/index.js", "--format", "amd"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid format \"amd\""));
}

#[test]
fn resolution_error_names_the_importer() {
  let dir = project();
  fs::write(dir.path().join("src/index.js"), "export * from './missing.js';\n").unwrap();

  libpack(dir.path())
    .args(["--entry", "src/index.js", "--format", "es"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("[resolution]"))
    .stderr(predicate::str::contains("\"./missing.js\" from \"src/index.js\""));
}
