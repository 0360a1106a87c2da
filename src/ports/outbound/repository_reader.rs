use crate::shared::Result;
use std::path::{Path, PathBuf};

/// RepositoryReader port for inspecting a checked-out repository
///
/// This port abstracts the file system operations needed to enumerate and
/// read repository files during detection and dependency-tree generation.
pub trait RepositoryReader: Send + Sync {
    /// Lists every file below `root`
    ///
    /// # Arguments
    /// * `root` - Repository root directory
    ///
    /// # Returns
    /// Paths relative to `root` in a stable walk order. The `.git`
    /// directory is never included.
    ///
    /// # Errors
    /// Returns an error if `root` is not a readable directory
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Reads a text file
    ///
    /// # Arguments
    /// * `path` - Path of the file to read
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The path is a symbolic link or not a regular file
    /// - The file exceeds the size limit
    fn read_text(&self, path: &Path) -> Result<String>;
}

impl<T: RepositoryReader + ?Sized> RepositoryReader for std::sync::Arc<T> {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_files(root)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        (**self).read_text(path)
    }
}
