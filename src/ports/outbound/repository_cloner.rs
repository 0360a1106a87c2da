use crate::repository_analysis::domain::RepositorySpec;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// RepositoryCloner port for obtaining a local checkout
#[async_trait]
pub trait RepositoryCloner: Send + Sync {
    /// Clones (or reuses) the repository under `base_dir` and checks out its branch
    ///
    /// # Arguments
    /// * `spec` - Parsed `url[@branch]`
    /// * `base_dir` - Directory the checkout is created in
    ///
    /// # Returns
    /// The path of the local checkout
    ///
    /// # Errors
    /// Returns an error if git is missing or clone/fetch/checkout fails
    async fn clone_repository(&self, spec: &RepositorySpec, base_dir: &Path) -> Result<PathBuf>;
}
