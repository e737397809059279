#![allow(dead_code)]

use std::{fs, path::Path, process::Command};

use libpack::{BundlerOptions, OutputFormat};
use tempfile::TempDir;

/// A project directory populated with `files`, relative paths to contents.
pub fn fixture(files: &[(&str, &str)]) -> TempDir {
  let dir = tempfile::tempdir().unwrap();
  for (path, content) in files {
    let path = dir.path().join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }
  dir
}

pub const WIDGET_LIB: &[(&str, &str)] = &[
  (
    "src/index.ts",
    "import { ref } from 'vue';\nimport { area } from './shapes';\n\nexport interface Options {\n  size: number;\n}\n\nexport const version: string = '1.0.0';\n\nexport function useCounter(start: number) {\n  return ref(start + area(1, 1));\n}\n\nexport { area };\nexport default useCounter;\n",
  ),
  ("src/shapes/index.ts", "export function area(w: number, h: number): number {\n  return w * h;\n}\n"),
];

pub fn widget_lib_options(dir: &Path) -> BundlerOptions {
  BundlerOptions {
    entry: Some("src/index.ts".to_string()),
    cwd: Some(dir.to_path_buf()),
    library_name: Some("widget-lib".to_string()),
    external: Some(vec!["vue".to_string()]),
    globals: Some([("vue".to_string(), "Vue".to_string())].into_iter().collect()),
    formats: Some(vec![OutputFormat::Es, OutputFormat::Umd]),
    out_dir: Some("./dist".to_string()),
    ..BundlerOptions::default()
  }
}

/// Options for a plain JavaScript project with `src/index.js` as entry.
pub fn js_options(dir: &Path, formats: &[OutputFormat]) -> BundlerOptions {
  BundlerOptions {
    entry: Some("src/index.js".to_string()),
    cwd: Some(dir.to_path_buf()),
    library_name: Some("lib".to_string()),
    formats: Some(formats.to_vec()),
    ..BundlerOptions::default()
  }
}

pub fn read(dir: &Path, path: &str) -> String {
  fs::read_to_string(dir.join(path)).unwrap()
}

/// Every file under `dir`, relative with `/` separators, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
  let mut files = vec![];
  if dir.exists() {
    collect(dir, dir, &mut files);
  }
  files.sort();
  files
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<String>) {
  for entry in fs::read_dir(dir).unwrap() {
    let path = entry.unwrap().path();
    if path.is_dir() {
      collect(root, &path, files);
    } else {
      let relative = path.strip_prefix(root).unwrap();
      files.push(relative.to_string_lossy().replace('\\', "/"));
    }
  }
}

/// Runs `node` with `args` inside `dir` and returns its stdout, `None` when node isn't installed.
pub fn run_node(dir: &Path, args: &[&str]) -> Option<String> {
  let output = Command::new("node").args(args).current_dir(dir).output().ok()?;
  assert!(output.status.success(), "node failed: {}", String::from_utf8_lossy(&output.stderr));
  Some(String::from_utf8(output.stdout).unwrap())
}
