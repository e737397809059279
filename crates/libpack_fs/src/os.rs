use std::{
  fs, io,
  io::Write,
  path::{Path, PathBuf},
};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }

  fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().ok_or_else(|| {
      io::Error::new(io::ErrorKind::InvalidInput, "output path has no parent directory")
    })?;
    fs::create_dir_all(dir)?;
    // The temporary file is deleted on drop if `persist` is never reached.
    let mut file = tempfile::Builder::new().prefix(".libpack-").suffix(".tmp").tempfile_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
  }

  fn remove_file(&self, path: &Path) -> io::Result<()> {
    fs::remove_file(path)
  }

  fn walk_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
      let entry = entry.map_err(io::Error::from)?;
      if entry.file_type().is_file() {
        files.push(entry.into_path());
      }
    }
    Ok(files)
  }
}

#[test]
fn test_write_atomic_replaces_content() {
  let dir = tempfile::tempdir().unwrap();
  let target = dir.path().join("nested").join("out.js");
  let fs = OsFileSystem;

  fs.write_atomic(&target, b"first").unwrap();
  fs.write_atomic(&target, b"second").unwrap();

  assert_eq!(fs.read_to_string(&target).unwrap(), "second");
  // Only the target remains, no temporary files.
  let files = fs.walk_files(dir.path()).unwrap();
  assert_eq!(files, vec![target]);
}

#[test]
fn test_walk_files_is_sorted_and_recursive() {
  let dir = tempfile::tempdir().unwrap();
  fs::create_dir_all(dir.path().join("b")).unwrap();
  fs::write(dir.path().join("b").join("c.txt"), "c").unwrap();
  fs::write(dir.path().join("a.txt"), "a").unwrap();

  let files = OsFileSystem.walk_files(dir.path()).unwrap();
  assert_eq!(files, vec![dir.path().join("a.txt"), dir.path().join("b").join("c.txt")]);
}
