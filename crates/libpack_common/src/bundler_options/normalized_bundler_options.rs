use std::path::PathBuf;

use libpack_utils::indexmap::{FxIndexMap, FxIndexSet};

use crate::{FilenameTemplate, OutputFormat, Platform};

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub entry: String,
  pub cwd: PathBuf,
  pub platform: Platform,
  pub external: FxIndexSet<String>,

  // --- Output
  /// Substituted for `[name]`: the library name, or the entry's file name without it.
  pub name: String,
  pub library_name: Option<String>,
  pub file_name: FilenameTemplate,
  /// Non-empty, without duplicates, in the order they were requested.
  pub formats: Vec<OutputFormat>,
  pub globals: FxIndexMap<String, String>,
  pub out_dir: PathBuf,
  pub public_dir: Option<PathBuf>,
  pub minify: bool,
  pub banner: Option<String>,
  pub footer: Option<String>,
}

impl NormalizedBundlerOptions {
  pub fn artifact_file_name(&self, format: OutputFormat) -> String {
    self.file_name.render(&self.name, format)
  }

  pub fn is_external(&self, specifier: &str) -> bool {
    self.external.contains(specifier)
  }

  pub fn global_name_of(&self, external: &str) -> Option<&str> {
    self.globals.get(external).map(String::as_str)
  }
}
