use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// File name of the SBOM produced at the repository root
pub const SBOM_FILE_NAME: &str = "sbom.json";

/// SbomTool port for the external SBOM generator
#[async_trait]
pub trait SbomTool: Send + Sync {
    /// Produces (or reuses) `sbom.json` for a repository
    ///
    /// # Returns
    /// Path of the SBOM document
    ///
    /// # Errors
    /// Returns an error if the generator cannot be run or produces no file
    async fn generate(&self, repo_path: &Path) -> Result<PathBuf>;
}
