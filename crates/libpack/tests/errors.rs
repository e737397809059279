mod common;

use std::sync::Arc;

use common::{fixture, js_options, list_files, widget_lib_options, WIDGET_LIB};
use libpack::{
  BuildDiagnostic, Bundler, BundlerOptions, OutputFormat, PublicDirOption, SfcScriptPlugin, Stage,
};

#[test]
fn missing_global_names_the_external() {
  let dir = fixture(WIDGET_LIB);
  let err = Bundler::new(BundlerOptions { globals: None, ..widget_lib_options(dir.path()) })
    .err()
    .unwrap();

  assert_eq!(err.len(), 1);
  assert_eq!(err[0].stage(), Stage::Configuration);
  assert!(err[0].to_string().contains("\"vue\""));
}

#[tokio::test]
async fn colliding_file_names_write_nothing() {
  let dir = fixture(WIDGET_LIB);
  let options =
    BundlerOptions { file_name: Some("index.js".to_string()), ..widget_lib_options(dir.path()) };

  let err = Bundler::new(options).err().unwrap();

  assert!(err[0].is_configuration());
  assert!(list_files(&dir.path().join("dist")).is_empty());
}

#[tokio::test]
async fn unresolved_import_names_importer_and_specifier() {
  let dir = fixture(&[
    ("src/index.js", "import { a } from './a.js';\nexport default a;\n"),
    ("src/a.js", "export { b as a } from './missing';\n"),
  ]);
  let err = Bundler::new(js_options(dir.path(), &[OutputFormat::Es])).unwrap().write().await.unwrap_err();

  assert_eq!(err.len(), 1);
  match &err[0] {
    BuildDiagnostic::Resolution { importer, specifier, .. } => {
      assert_eq!(importer, "src/a.js");
      assert_eq!(specifier, "./missing");
    }
    other => panic!("unexpected diagnostic {other}"),
  }
  assert!(list_files(&dir.path().join("dist")).is_empty());
}

#[tokio::test]
async fn every_failing_module_is_reported() {
  let dir = fixture(&[
    ("src/index.js", "import './a.js';\nimport './b.js';\n"),
    ("src/a.js", "import './nope-a';\n"),
    ("src/b.js", "import './nope-b';\n"),
  ]);
  let err =
    Bundler::new(js_options(dir.path(), &[OutputFormat::Es])).unwrap().generate().await.unwrap_err();

  let messages = err.iter().map(ToString::to_string).collect::<Vec<_>>();
  assert_eq!(messages.len(), 2);
  assert!(messages[0].contains("\"./nope-a\" from \"src/a.js\""));
  assert!(messages[1].contains("\"./nope-b\" from \"src/b.js\""));
}

#[tokio::test]
async fn malformed_module_reports_location() {
  let dir = fixture(&[
    ("src/index.js", "import './broken.js';\n"),
    ("src/broken.js", "export const a = 1;\nexport const = 2;\n"),
  ]);
  let err =
    Bundler::new(js_options(dir.path(), &[OutputFormat::Es])).unwrap().generate().await.unwrap_err();

  match &err[0] {
    BuildDiagnostic::Syntax { file, line, .. } => {
      assert_eq!(file, "src/broken.js");
      assert_eq!(*line, 2);
    }
    other => panic!("unexpected diagnostic {other}"),
  }
  assert_eq!(err[0].stage(), Stage::Transformation);
}

#[tokio::test]
async fn referenced_external_without_global_fails_packaging() {
  let dir = fixture(&[("src/index.js", "export * from 'https://cdn.example.com/vue.js';\n")]);
  let err = Bundler::new(js_options(dir.path(), &[OutputFormat::Es, OutputFormat::Iife]))
    .unwrap()
    .write()
    .await
    .unwrap_err();

  assert_eq!(err[0].stage(), Stage::Packaging);
  assert!(err[0].to_string().contains("\"https://cdn.example.com/vue.js\""));
  assert!(err[0].to_string().contains("iife"));
  assert!(list_files(&dir.path().join("dist")).is_empty());
}

#[tokio::test]
async fn public_file_colliding_with_artifact() {
  let dir = fixture(&[
    ("src/index.js", "export const a = 1;\n"),
    ("public/lib.es.js", "// stale\n"),
  ]);
  let options = BundlerOptions {
    public_dir: Some(PublicDirOption::Enabled(true)),
    ..js_options(dir.path(), &[OutputFormat::Es])
  };
  let err = Bundler::new(options).unwrap().write().await.unwrap_err();

  assert!(err[0].to_string().contains("\"lib.es.js\""));
  assert!(list_files(&dir.path().join("dist")).is_empty());
}

#[tokio::test]
async fn top_level_await_is_rejected() {
  let dir = fixture(&[("src/index.js", "export const data = await Promise.resolve(1);\n")]);
  let err =
    Bundler::new(js_options(dir.path(), &[OutputFormat::Es])).unwrap().generate().await.unwrap_err();

  assert!(matches!(&err[0], BuildDiagnostic::Syntax { line: 1, column: 21, .. }));
}

#[tokio::test]
async fn missing_entry_is_a_resolution_error() {
  let dir = fixture(&[("src/index.js", "export const a = 1;\n")]);
  let options =
    BundlerOptions { entry: Some("src/main.js".to_string()), ..js_options(dir.path(), &[OutputFormat::Es]) };
  let err = Bundler::new(options).unwrap().write().await.unwrap_err();

  assert_eq!(err.len(), 1);
  assert_eq!(err[0].stage(), Stage::Resolution);
  assert!(err[0].to_string().contains("\"src/main.js\""));
  assert!(list_files(&dir.path().join("dist")).is_empty());
}

#[tokio::test]
async fn typescript_errors_point_into_the_file() {
  let dir = fixture(&[(
    "src/index.ts",
    "export interface Options {\n  size: number;\n  label: string;\n}\n\n// computed once\nexport const x: number = await Promise.resolve(1);\n",
  )]);
  let options =
    BundlerOptions { entry: Some("src/index.ts".to_string()), ..js_options(dir.path(), &[OutputFormat::Es]) };
  let err = Bundler::new(options).unwrap().generate().await.unwrap_err();

  match &err[0] {
    BuildDiagnostic::Syntax { file, line, column, .. } => {
      assert_eq!(file, "src/index.ts");
      assert_eq!((*line, *column), (7, 26));
    }
    other => panic!("unexpected diagnostic {other}"),
  }
}

#[tokio::test]
async fn component_errors_point_into_the_file() {
  let dir = fixture(&[
    ("src/index.js", "export { default as Card } from './Card.vue';\n"),
    (
      "src/Card.vue",
      "<template>\n  <div>{{ title }}</div>\n</template>\n\n<script>\nexport default { name: 'Card' };\nconst = ;\n</script>\n",
    ),
  ]);
  let bundler = Bundler::with_plugins(
    js_options(dir.path(), &[OutputFormat::Es]),
    vec![Arc::new(SfcScriptPlugin)],
  )
  .unwrap();
  let err = bundler.generate().await.unwrap_err();

  match &err[0] {
    BuildDiagnostic::Syntax { file, line, .. } => {
      assert_eq!(file, "src/Card.vue");
      assert_eq!(*line, 7);
    }
    other => panic!("unexpected diagnostic {other}"),
  }
}
