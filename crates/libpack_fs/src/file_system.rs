use std::{
  io,
  path::{Path, PathBuf},
};

/// Filesystem access used by the build. Paths are absolute.
pub trait FileSystem: Send + Sync {
  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn is_dir(&self, path: &Path) -> bool;

  /// Writes `content` to a temporary file next to `path`, then renames it into place.
  /// On error nothing is left at `path` or in the temporary location.
  fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn remove_file(&self, path: &Path) -> io::Result<()>;

  /// Every regular file under `dir`, recursively, sorted by path.
  fn walk_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}
