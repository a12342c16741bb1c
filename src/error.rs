//! Failures that leave nothing to return.
use std::io;
use std::path::PathBuf;

/// The top-level file of a load could not be read.
///
/// Everything that goes wrong after the file is read is reported as a
/// diagnostic next to the parsed result instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  /// Opening or reading the file failed.
  #[error("could not open file {}: {}", .path.display(), .source)]
  Open {
    /// The file that was asked for.
    path: PathBuf,
    /// Why it could not be read.
    source: io::Error,
  },
}

impl LoadError {
  /// The file the error is about.
  pub fn path(&self) -> &std::path::Path {
    match self {
      LoadError::Open { path, .. } => path,
    }
  }
}
