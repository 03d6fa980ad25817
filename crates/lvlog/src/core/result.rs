//! Result extension traits for IO operations

use std::path::Path;

use crate::core::error::{Error, Result};

/// Extension trait attaching path context to IO results
pub trait IoResultExt<T> {
    /// Map an IO error from directory creation into [`Error::CreateDir`]
    fn dir_context(self, path: &Path) -> Result<T>;

    /// Map an IO error from opening a file into [`Error::OpenFile`]
    fn open_context(self, path: &Path) -> Result<T>;

    /// Map an IO error from writing into [`Error::Write`]
    fn write_context(self, target: impl FnOnce() -> String) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn dir_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| Error::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    fn open_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| Error::OpenFile {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_context(self, target: impl FnOnce() -> String) -> Result<T> {
        self.map_err(|source| Error::Write {
            target: target(),
            source,
        })
    }
}
