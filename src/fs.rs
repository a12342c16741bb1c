//! Access to the files a mesh refers to.
//!
//! The parsers never touch the file system directly when resolving `mtllib`
//! references; they go through a `FileLoader` supplied by the caller.
use std::io;
use std::path::Path;

use crate::error::LoadError;

/// Reads the whole contents of a file.
pub trait FileLoader {
  /// Returns the bytes stored at `path`.
  fn load(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Loads files from the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl FileLoader for FsLoader {
  fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
  }
}

impl<F> FileLoader for F
where
  F: Fn(&Path) -> io::Result<Vec<u8>>,
{
  fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
    self(path)
  }
}

/// Reads the top-level file of a load, mapping failure to `LoadError`.
pub(crate) fn read_top_level(path: &Path) -> Result<Vec<u8>, LoadError> {
  FsLoader.load(path).map_err(|source| LoadError::Open {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn closures_are_loaders() {
    let loader = |path: &Path| -> io::Result<Vec<u8>> {
      if path == Path::new("dir/a.mtl") {
        Ok(b"newmtl a".to_vec())
      } else {
        Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
      }
    };
    assert_eq!(loader.load(Path::new("dir/a.mtl")).unwrap(), b"newmtl a".to_vec());
    assert!(loader.load(Path::new("dir/b.mtl")).is_err());
  }

  #[test]
  fn missing_top_level_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.obj");
    let err = read_top_level(&path).unwrap_err();
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().starts_with("could not open file"));
  }
}
