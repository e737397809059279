use std::path::{Path, PathBuf};

use libpack_common::OutputAsset;
use libpack_error::{BuildDiagnostic, BuildResult};
use libpack_fs::FileSystem;

/// Writes every asset through a temporary file and a rename. On the first failure the files
/// written so far by this call are removed again, so a failed build leaves no artifact behind.
pub fn write_assets(fs: &dyn FileSystem, out_dir: &Path, assets: &[OutputAsset]) -> BuildResult<()> {
  let mut written: Vec<PathBuf> = Vec::with_capacity(assets.len());

  for asset in assets {
    let path = out_dir.join(asset.filename());
    if let Err(err) = fs.write_atomic(&path, asset.content_as_bytes()) {
      let mut errors = vec![BuildDiagnostic::io(&path, err)];
      for path in written.iter().rev() {
        if let Err(err) = fs.remove_file(path) {
          errors.push(BuildDiagnostic::io(path, err));
        }
      }
      tracing::debug!(rolled_back = written.len(), "write failed");
      return Err(errors.into());
    }
    tracing::trace!(path = %path.display(), "written");
    written.push(path);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::{io, sync::Mutex};

  use libpack_common::{OutputAssetKind, OutputFormat, StrOrBytes};

  use super::*;

  /// Records calls and fails writes to one file name.
  #[derive(Default)]
  struct FailingFs {
    fail_on: &'static str,
    files: Mutex<Vec<PathBuf>>,
  }

  impl FileSystem for FailingFs {
    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
      unimplemented!()
    }

    fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
      unimplemented!()
    }

    fn is_dir(&self, _path: &Path) -> bool {
      false
    }

    fn write_atomic(&self, path: &Path, _content: &[u8]) -> io::Result<()> {
      if path.ends_with(self.fail_on) {
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
      }
      self.files.lock().unwrap().push(path.to_path_buf());
      Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
      self.files.lock().unwrap().retain(|file| file != path);
      Ok(())
    }

    fn walk_files(&self, _dir: &Path) -> io::Result<Vec<PathBuf>> {
      Ok(vec![])
    }
  }

  fn chunk(filename: &str, format: OutputFormat) -> OutputAsset {
    OutputAsset {
      filename: filename.to_string(),
      content: StrOrBytes::Str(String::new()),
      kind: OutputAssetKind::Chunk(format),
    }
  }

  #[test]
  fn rolls_back_on_failure() {
    let fs = FailingFs { fail_on: "lib.umd.js", ..FailingFs::default() };
    let assets = [
      chunk("lib.es.js", OutputFormat::Es),
      chunk("lib.cjs.js", OutputFormat::Cjs),
      chunk("lib.umd.js", OutputFormat::Umd),
    ];

    let err = write_assets(&fs, Path::new("/out"), &assets).unwrap_err();

    assert_eq!(err.len(), 1);
    assert!(err[0].to_string().contains("lib.umd.js"));
    assert!(fs.files.lock().unwrap().is_empty());
  }

  #[test]
  fn writes_everything() {
    let fs = FailingFs { fail_on: "never.js", ..FailingFs::default() };
    let assets = [chunk("lib.es.js", OutputFormat::Es), chunk("lib.cjs.js", OutputFormat::Cjs)];

    write_assets(&fs, Path::new("/out"), &assets).unwrap();

    assert_eq!(
      *fs.files.lock().unwrap(),
      vec![PathBuf::from("/out/lib.es.js"), PathBuf::from("/out/lib.cjs.js")]
    );
  }
}
