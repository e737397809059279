pub mod filename_template;
pub mod module_type;
pub mod normalized_bundler_options;
pub mod output_format;
pub mod platform;

use std::path::PathBuf;

use libpack_utils::indexmap::FxIndexMap;
use serde::Deserialize;

use crate::{OutputFormat, Platform};

/// Raw options, as written in `libpack.config.json` or assembled from command line flags.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerOptions {
  // --- Input
  pub entry: Option<String>,
  pub cwd: Option<PathBuf>,
  pub platform: Option<Platform>,
  pub external: Option<Vec<String>>,

  // --- Output
  pub library_name: Option<String>,
  pub file_name: Option<String>,
  pub formats: Option<Vec<OutputFormat>>,
  pub globals: Option<FxIndexMap<String, String>>,
  pub out_dir: Option<String>,
  pub public_dir: Option<PublicDirOption>,
  pub minify: Option<bool>,
  pub banner: Option<String>,
  pub footer: Option<String>,
}

/// `false` disables copying, `true` means `<cwd>/public`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PublicDirOption {
  Enabled(bool),
  Dir(String),
}

#[test]
fn test_deserialize_config() {
  let options: BundlerOptions = serde_json::from_str(
    r#"{
      "entry": "src/index.ts",
      "libraryName": "vue-canvas-editor",
      "fileName": "vue-canvas-editor.[format].js",
      "formats": ["es", "umd"],
      "external": ["vue"],
      "globals": { "vue": "Vue" },
      "outDir": "./dist",
      "publicDir": false
    }"#,
  )
  .unwrap();

  assert_eq!(options.entry.as_deref(), Some("src/index.ts"));
  assert_eq!(options.formats, Some(vec![OutputFormat::Es, OutputFormat::Umd]));
  assert_eq!(options.globals.unwrap().get("vue").map(String::as_str), Some("Vue"));
  assert_eq!(options.public_dir, Some(PublicDirOption::Enabled(false)));
}

#[test]
fn test_deserialize_rejects_unknown_format() {
  let err = serde_json::from_str::<BundlerOptions>(r#"{ "formats": ["amd"] }"#).unwrap_err();
  assert!(err.to_string().contains("Invalid format \"amd\""));
}
