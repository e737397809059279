use std::sync::Arc;

use libpack_common::BundlerOptions;
use libpack_error::BuildResult;
use libpack_fs::OsFileSystem;
use libpack_plugin::{PluginDriver, SharedPlugin, SharedPluginDriver};
use libpack_resolver::Resolver;

use crate::{
  stages::{
    generate::GenerateStage,
    link::{LinkStage, LinkStageOutput},
    scan::ScanStage,
    write::write_assets,
  },
  types::{SharedOptions, SharedResolver, bundle_output::BundleOutput},
  utils::normalize_options::normalize_options,
};

/// One build session. Holds everything the stages share, nothing global.
pub struct Bundler {
  pub(crate) fs: OsFileSystem,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
  pub(crate) plugin_driver: SharedPluginDriver,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> BuildResult<Self> {
    Self::with_plugins(options, vec![])
  }

  /// Options are validated here, so a misconfigured build fails before any module is read.
  pub fn with_plugins(options: BundlerOptions, plugins: Vec<SharedPlugin>) -> BuildResult<Self> {
    let options = normalize_options(options)?;
    let plugin_driver = PluginDriver::new_shared(plugins);

    let resolver: SharedResolver = Arc::new(Resolver::new(
      options.platform,
      options.cwd.clone(),
      &plugin_driver.resolve_extensions(),
    ));

    Ok(Self { fs: OsFileSystem, options: Arc::new(options), resolver, plugin_driver })
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  /// Builds and writes every artifact to the output directory.
  pub async fn write(&self) -> BuildResult<BundleOutput> {
    let output = self.generate().await?;
    write_assets(&self.fs, &self.options.out_dir, &output.assets)?;
    tracing::debug!(out_dir = %self.options.out_dir.display(), files = output.assets.len(), "write stage");
    Ok(output)
  }

  /// Builds every artifact in memory.
  pub async fn generate(&self) -> BuildResult<BundleOutput> {
    let link_output = self.scan_and_link().await?;
    let assets = GenerateStage::new(&link_output, &self.options).generate(&self.fs)?;
    Ok(BundleOutput { assets, warnings: link_output.warnings })
  }

  async fn scan_and_link(&self) -> BuildResult<LinkStageOutput> {
    let scan_stage_output = ScanStage::new(
      self.fs,
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.plugin_driver),
    )
    .scan()
    .await?;

    Ok(LinkStage::new(scan_stage_output).link())
  }
}
