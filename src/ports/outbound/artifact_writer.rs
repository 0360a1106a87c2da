use crate::shared::Result;
use std::path::Path;

/// ArtifactWriter port for files produced alongside the report
///
/// Dependency trees, command transcripts and intermediate JSON documents
/// are written through this port into the output directory.
pub trait ArtifactWriter: Send + Sync {
    /// Creates or replaces a file, creating parent directories as needed
    ///
    /// # Errors
    /// Returns an error if the target is a symbolic link or cannot be written
    fn write_artifact(&self, path: &Path, content: &str) -> Result<()>;

    /// Appends to a file, creating it when missing
    ///
    /// # Errors
    /// Returns an error if the target is a symbolic link or cannot be written
    fn append_artifact(&self, path: &Path, content: &str) -> Result<()>;
}
