use std::path::Path;

use libpack_common::{OutputAsset, OutputAssetKind, StrOrBytes};
use libpack_error::{BuildDiagnostic, BuildError, BuildResult};
use libpack_fs::FileSystem;
use libpack_utils::path_ext::PathExt;
use sugar_path::SugarPath;

/// Every file under `public_dir`, keyed by its path relative to it. A missing directory
/// contributes nothing.
pub fn collect_public_assets(
  fs: &dyn FileSystem,
  public_dir: &Path,
  artifacts: &[OutputAsset],
) -> BuildResult<Vec<OutputAsset>> {
  if !fs.is_dir(public_dir) {
    tracing::debug!(dir = %public_dir.display(), "public directory does not exist");
    return Ok(vec![]);
  }

  let files = fs.walk_files(public_dir).map_err(|err| BuildDiagnostic::io(public_dir, err))?;

  let mut assets = Vec::with_capacity(files.len());
  let mut errors = vec![];
  for file in files {
    let filename = file.relative(public_dir).expect_to_slash();
    if artifacts.iter().any(|artifact| artifact.filename == filename) {
      errors.push(BuildDiagnostic::packaging(format!(
        "The public file \"{filename}\" has the same name as an output file"
      )));
      continue;
    }
    match fs.read(&file) {
      Ok(content) => assets.push(OutputAsset {
        filename,
        content: StrOrBytes::Bytes(content),
        kind: OutputAssetKind::Public,
      }),
      Err(err) => errors.push(BuildDiagnostic::io(&file, err)),
    }
  }

  if errors.is_empty() { Ok(assets) } else { Err(BuildError::from(errors)) }
}
