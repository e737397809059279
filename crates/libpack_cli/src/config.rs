use std::{
  io,
  path::{Path, PathBuf},
  sync::Arc,
};

use libpack::{BuildDiagnostic, BundlerOptions, PublicDirOption, SfcScriptPlugin, SharedPlugin};
use serde::Deserialize;

use crate::args::Commands;

pub const DEFAULT_CONFIG_FILE: &str = "libpack.config.json";

/// Contents of `libpack.config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
  /// Names of built-in plugins to enable, e.g. `"sfc"`.
  #[serde(default)]
  pub plugins: Vec<String>,
  #[serde(flatten)]
  pub options: BundlerOptions,
}

/// Reads the configuration file. The default file is optional, an explicit `--config` is not.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ConfigFile, BuildDiagnostic> {
  let path = explicit.map_or_else(|| root.join(DEFAULT_CONFIG_FILE), |path| root.join(path));
  let source = match std::fs::read_to_string(&path) {
    Ok(source) => source,
    Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
      return Ok(ConfigFile::default());
    }
    Err(err) => return Err(BuildDiagnostic::io(&path, err)),
  };
  tracing::debug!(path = %path.display(), "loaded configuration file");

  let mut config: ConfigFile = serde_json::from_str(&source).map_err(|err| {
    BuildDiagnostic::configuration(format!("Invalid configuration in {}: {err}", path.display()))
  })?;
  // A relative `cwd` in the file is relative to the file itself.
  if let (Some(cwd), Some(dir)) = (&config.options.cwd, path.parent()) {
    config.options.cwd = Some(dir.join(cwd));
  }
  Ok(config)
}

pub fn resolve_plugins(names: &[String]) -> Result<Vec<SharedPlugin>, BuildDiagnostic> {
  names
    .iter()
    .map(|name| match name.as_str() {
      "sfc" => Ok(Arc::new(SfcScriptPlugin) as SharedPlugin),
      _ => Err(BuildDiagnostic::configuration(format!(
        "Unknown plugin \"{name}\", available plugins: sfc"
      ))),
    })
    .collect()
}

/// Command line flags win over the configuration file.
pub fn merge_args(mut options: BundlerOptions, args: Commands, root: PathBuf) -> BundlerOptions {
  options.cwd = Some(args.cwd.or(options.cwd).unwrap_or(root));
  if args.entry.is_some() {
    options.entry = args.entry;
  }
  if args.name.is_some() {
    options.library_name = args.name;
  }
  if args.file_name.is_some() {
    options.file_name = args.file_name;
  }
  if !args.format.is_empty() {
    options.formats = Some(args.format);
  }
  if !args.external.is_empty() {
    options.external.get_or_insert_with(Vec::new).extend(args.external);
  }
  if !args.globals.is_empty() {
    options.globals.get_or_insert_with(Default::default).extend(args.globals);
  }
  if args.out_dir.is_some() {
    options.out_dir = args.out_dir;
  }
  if let Some(public_dir) = args.public_dir {
    options.public_dir = Some(match public_dir.as_str() {
      "false" => PublicDirOption::Enabled(false),
      "true" => PublicDirOption::Enabled(true),
      _ => PublicDirOption::Dir(public_dir),
    });
  }
  if args.minify {
    options.minify = Some(true);
  }
  if args.platform.is_some() {
    options.platform = args.platform;
  }
  options
}
