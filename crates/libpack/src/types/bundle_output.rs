use libpack_common::OutputAsset;

#[derive(Debug, Default)]
pub struct BundleOutput {
  /// One chunk per requested format, in request order, followed by public files.
  pub assets: Vec<OutputAsset>,
  pub warnings: Vec<anyhow::Error>,
}
