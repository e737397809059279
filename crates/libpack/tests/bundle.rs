mod common;

use std::sync::Arc;

use common::{fixture, js_options, list_files, read, run_node, widget_lib_options, WIDGET_LIB};
use libpack::{Bundler, BundlerOptions, OutputFormat, PublicDirOption, SfcScriptPlugin};

#[tokio::test]
async fn widget_lib_es_and_umd() {
  let dir = fixture(WIDGET_LIB);
  let bundler = Bundler::new(widget_lib_options(dir.path())).unwrap();
  let output = bundler.write().await.unwrap();

  assert!(output.warnings.is_empty());
  assert_eq!(list_files(&dir.path().join("dist")), vec!["widget-lib.es.js", "widget-lib.umd.js"]);

  let es = read(dir.path(), "dist/widget-lib.es.js");
  assert!(es.starts_with("import * as __external_0 from \"vue\";\n"));
  assert!(es.contains("__cache[\"vue\"] = { exports: __external_0 };"));
  assert!(es.contains("__modules[\"src/shapes/index.ts\"] = function (__exports) {"));
  // The entry runs at the top level, its own bindings are exported directly.
  assert!(!es.contains("__modules[\"src/index.ts\"]"));
  assert!(es.contains("var __exports = __register(\"src/index.ts\");"));
  assert!(es.contains("__import_0.ref("));
  assert!(es.contains("var __export_0 = __exports.area;"));
  assert!(es.contains("export { __export_0 as area, __default as default, useCounter, version };"));
  assert!(!es.contains("interface"));

  let umd = read(dir.path(), "dist/widget-lib.umd.js");
  assert!(umd.contains("factory(exports, require(\"vue\"))"));
  assert!(umd.contains("define([\"exports\", \"vue\"], factory)"));
  assert!(umd.contains("factory(global[\"widget-lib\"] = {}, global.Vue)"));
  assert!(umd.contains("__cache[\"vue\"] = { exports: __toESM(__external_0) };"));
  assert!(umd.contains("__reexport(exports, __require(\"src/index.ts\"));"));
  assert!(!umd.contains("import "));
}

#[tokio::test]
async fn rebuilding_is_byte_identical() {
  let dir = fixture(WIDGET_LIB);
  let options = BundlerOptions {
    formats: Some(vec![OutputFormat::Es, OutputFormat::Cjs, OutputFormat::Umd, OutputFormat::Iife]),
    ..widget_lib_options(dir.path())
  };

  let bundler = Bundler::new(options).unwrap();
  let first = bundler.generate().await.unwrap();
  let second = bundler.generate().await.unwrap();

  assert_eq!(first.assets.len(), 4);
  for (a, b) in first.assets.iter().zip(&second.assets) {
    assert_eq!(a.filename, b.filename);
    assert_eq!(a.content_as_bytes(), b.content_as_bytes());
  }
}

#[tokio::test]
async fn cjs_and_iife_exports() {
  let dir = fixture(WIDGET_LIB);
  let options = BundlerOptions {
    library_name: Some("WidgetLib".to_string()),
    formats: Some(vec![OutputFormat::Cjs, OutputFormat::Iife]),
    ..widget_lib_options(dir.path())
  };
  Bundler::new(options).unwrap().write().await.unwrap();

  let cjs = read(dir.path(), "dist/WidgetLib.cjs.js");
  assert!(cjs.starts_with("\"use strict\";\n"));
  assert!(cjs.contains("__cache[\"vue\"] = { exports: __toESM(require(\"vue\")) };"));
  assert!(cjs.trim_end().ends_with("module.exports = __require(\"src/index.ts\");"));

  let iife = read(dir.path(), "dist/WidgetLib.iife.js");
  assert!(iife.starts_with("var WidgetLib = (function (exports, __external_0) {\n"));
  assert!(iife.trim_end().ends_with("})({}, Vue);"));
}

#[tokio::test]
async fn import_only_formats_need_no_globals() {
  let dir = fixture(WIDGET_LIB);
  let options = BundlerOptions {
    globals: None,
    formats: Some(vec![OutputFormat::Es, OutputFormat::Cjs]),
    ..widget_lib_options(dir.path())
  };
  Bundler::new(options).unwrap().write().await.unwrap();

  assert_eq!(list_files(&dir.path().join("dist")), vec!["widget-lib.cjs.js", "widget-lib.es.js"]);
}

#[tokio::test]
async fn cycles_run_each_module_once() {
  let dir = fixture(&[
    ("src/index.js", "import { a } from './a.js';\nexport const value = a;\n"),
    ("src/a.js", "import { b } from './b.js';\nconsole.log('a init');\nexport const a = 'a';\nexport function readB() { return b; }\n"),
    ("src/b.js", "import { a } from './a.js';\nconsole.log('b init');\nexport const b = 'b';\nexport function readA() { return a; }\n"),
  ]);
  let output =
    Bundler::new(js_options(dir.path(), &[OutputFormat::Es])).unwrap().generate().await.unwrap();

  let code = output.assets[0].content.try_as_str().unwrap();
  assert_eq!(code.matches("console.log('a init')").count(), 1);
  assert_eq!(code.matches("console.log('b init')").count(), 1);
  // `b` runs first because `a` requires it before its own body.
  assert!(code.find("__modules[\"src/b.js\"]").unwrap() < code.find("__modules[\"src/a.js\"]").unwrap());
  assert!(code.contains("return __import_0.a;"));

  let warnings = output.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
  assert_eq!(warnings, vec!["Circular dependency: src/a.js -> src/b.js -> src/a.js."]);
}

const COUNTER_LIB: &[(&str, &str)] = &[(
  "src/index.js",
  "let counter = 0;\nexport function bump() {\n  counter += 1;\n  return counter;\n}\nexport { counter };\n",
)];

#[tokio::test]
async fn es_exports_entry_bindings_directly() {
  let dir = fixture(COUNTER_LIB);
  let output =
    Bundler::new(js_options(dir.path(), &[OutputFormat::Es])).unwrap().generate().await.unwrap();

  let code = output.assets[0].content.try_as_str().unwrap();
  assert!(!code.contains("__modules[\"src/index.js\"]"));
  assert!(code.contains("var __exports = __register(\"src/index.js\");\n__export(__exports, {"));
  assert!(code.contains("\nlet counter = 0;\n"));
  assert!(code.trim_end().ends_with("export { bump, counter };"));
}

#[tokio::test]
async fn es_counter_stays_live_in_node() {
  let mut files = COUNTER_LIB.to_vec();
  files.push((
    "main.mjs",
    "import { counter, bump } from './dist/lib.mjs';\nconsole.log(counter, bump(), counter);\n",
  ));
  let dir = fixture(&files);
  let options = BundlerOptions {
    file_name: Some("[name].mjs".to_string()),
    ..js_options(dir.path(), &[OutputFormat::Es])
  };
  Bundler::new(options).unwrap().write().await.unwrap();

  let Some(stdout) = run_node(dir.path(), &["main.mjs"]) else { return };
  assert_eq!(stdout, "0 1 1\n");
}

#[tokio::test]
async fn cjs_runs_each_module_once_in_node() {
  let dir = fixture(&[
    ("src/index.js", "import { a } from './a.js';\nexport const value = a;\nexport const topLevelThis = typeof this;\n"),
    ("src/a.js", "import { b } from './b.js';\nconsole.log('a init');\nexport const a = 'a' + b;\n"),
    ("src/b.js", "import { a } from './a.js';\nconsole.log('b init');\nexport const b = 'b';\nexport function readA() { return a; }\n"),
    ("main.js", "const lib = require('./dist/lib.cjs.js');\nconsole.log(lib.value, lib.topLevelThis);\n"),
  ]);
  Bundler::new(js_options(dir.path(), &[OutputFormat::Cjs])).unwrap().write().await.unwrap();

  let Some(stdout) = run_node(dir.path(), &["main.js"]) else { return };
  assert_eq!(stdout, "b init\na init\nab undefined\n");
}

#[tokio::test]
async fn dynamic_imports_are_inlined() {
  let dir = fixture(&[
    ("src/index.js", "export const load = () => import('./lazy.js');\n"),
    ("src/lazy.js", "export const answer = 42;\n"),
  ]);
  let output =
    Bundler::new(js_options(dir.path(), &[OutputFormat::Cjs])).unwrap().generate().await.unwrap();

  let code = output.assets[0].content.try_as_str().unwrap();
  assert!(code.contains("() => Promise.resolve().then(() => __require(\"src/lazy.js\"))"));
  assert!(code.contains("__modules[\"src/lazy.js\"] = function (__exports) {"));
}

#[tokio::test]
async fn star_exports_and_json() {
  let dir = fixture(&[
    ("src/index.js", "export * from './colors.js';\nexport * from 'vue';\nexport { default as config } from './config.json';\n"),
    ("src/colors.js", "export const red = '#f00';\nexport default 'ignored';\n"),
    ("src/config.json", "{ \"size\": 3 }\n"),
  ]);
  let options =
    BundlerOptions { external: Some(vec!["vue".to_string()]), ..js_options(dir.path(), &[OutputFormat::Es]) };
  let output = Bundler::new(options).unwrap().generate().await.unwrap();

  let code = output.assets[0].content.try_as_str().unwrap();
  assert!(code.contains("__exportStar(__exports, __import_0);"));
  assert!(code.contains("var __default = { \"size\": 3 };"));
  assert!(code.contains("export { __export_0 as config, __export_1 as red };"));
  assert!(code.trim_end().ends_with("export * from \"vue\";"));
}

#[tokio::test]
async fn sfc_plugin_bundles_vue_files() {
  let dir = fixture(&[
    ("src/index.js", "import Button from './Button.vue';\nexport { Button };\n"),
    (
      "src/Button.vue",
      "<template>\n  <button>{{ label }}</button>\n</template>\n\n<script lang=\"ts\">\nconst name: string = 'WButton';\nexport default { name };\n</script>\n",
    ),
  ]);
  let bundler = Bundler::with_plugins(
    js_options(dir.path(), &[OutputFormat::Es]),
    vec![Arc::new(SfcScriptPlugin)],
  )
  .unwrap();
  let output = bundler.generate().await.unwrap();

  let code = output.assets[0].content.try_as_str().unwrap();
  assert!(code.contains("__modules[\"src/Button.vue\"] = function (__exports) {"));
  assert!(code.contains("\"WButton\""));
  assert!(!code.contains("<template>"));
}

#[tokio::test]
async fn public_dir_is_copied() {
  let dir = fixture(&[
    ("src/index.js", "export const a = 1;\n"),
    ("public/robots.txt", "User-agent: *\n"),
    ("public/icons/logo.svg", "<svg/>"),
  ]);
  let options = BundlerOptions {
    public_dir: Some(PublicDirOption::Enabled(true)),
    ..js_options(dir.path(), &[OutputFormat::Es])
  };
  Bundler::new(options).unwrap().write().await.unwrap();

  assert_eq!(
    list_files(&dir.path().join("dist")),
    vec!["icons/logo.svg", "lib.es.js", "robots.txt"]
  );
  assert_eq!(read(dir.path(), "dist/robots.txt"), "User-agent: *\n");
}

#[tokio::test]
async fn banner_footer_and_minify() {
  let dir = fixture(&[("src/index.js", "export const answer = 40 + 2;\n")]);
  let options = BundlerOptions {
    banner: Some("/*! lib v1 */".to_string()),
    footer: Some("// end".to_string()),
    minify: Some(true),
    ..js_options(dir.path(), &[OutputFormat::Cjs])
  };
  let output = Bundler::new(options).unwrap().generate().await.unwrap();

  let code = output.assets[0].content.try_as_str().unwrap();
  assert!(code.starts_with("/*! lib v1 */\n"));
  assert!(code.ends_with("\n// end\n"));
  assert!(!code.contains("__modules[\"src/index.js\"] = function (__exports) {\n"));
}
