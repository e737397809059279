use libpack_error::{BuildDiagnostic, BuildResult};
use libpack_fs::OsFileSystem;
use libpack_plugin::SharedPluginDriver;

use crate::{
  module_loader::{ModuleLoader, ModuleLoaderOutput},
  types::{SharedOptions, SharedResolver},
  utils::resolve_id::resolve_id,
};

pub type ScanStageOutput = ModuleLoaderOutput;

/// Importer named in diagnostics about the entry itself.
const ENTRY_IMPORTER: &str = ".";

pub struct ScanStage {
  fs: OsFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  plugin_driver: SharedPluginDriver,
}

impl ScanStage {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugin_driver: SharedPluginDriver,
  ) -> Self {
    Self { fs, options, resolver, plugin_driver }
  }

  pub async fn scan(&self) -> BuildResult<ScanStageOutput> {
    let entry =
      resolve_id(&self.options, &self.resolver, &self.options.entry, None, ENTRY_IMPORTER, true)?;
    if entry.is_external {
      return Err(
        BuildDiagnostic::configuration(format!(
          "The entry \"{}\" resolves to an external module",
          entry.id
        ))
        .into(),
      );
    }
    tracing::debug!(entry = %entry.id, "scan stage");

    let module_loader = ModuleLoader::new(
      self.fs,
      self.options.clone(),
      self.resolver.clone(),
      self.plugin_driver.clone(),
    );
    module_loader.fetch_all_modules(entry).await
  }
}
