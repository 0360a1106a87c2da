use crate::ports::outbound::RepositoryReader;
use crate::repository_analysis::domain::RepositoryAnalysis;
use crate::repository_analysis::services::{DependencyManagerDetector, LanguageDetector};
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// DetectRepositoryUseCase - Primary language and dependency manager of a checkout
pub struct DetectRepositoryUseCase<R> {
    reader: R,
}

impl<R: RepositoryReader> DetectRepositoryUseCase<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Walks the repository and classifies it
    ///
    /// # Errors
    /// Returns an error if `repo_path` is not a directory or cannot be walked
    pub fn execute(&self, repo_path: &Path) -> Result<RepositoryAnalysis> {
        let files = self.list_files(repo_path)?;
        Ok(self.analyze(repo_path, &files))
    }

    /// Relative repository files in walk order
    pub fn list_files(&self, repo_path: &Path) -> Result<Vec<PathBuf>> {
        if !repo_path.is_dir() {
            return Err(OrchestratorError::InvalidProjectPath {
                path: repo_path.to_path_buf(),
                reason: "Directory does not exist".to_string(),
            }
            .into());
        }
        self.reader.list_files(repo_path)
    }

    /// Classifies an already-listed repository
    pub fn analyze(&self, repo_path: &Path, files: &[PathBuf]) -> RepositoryAnalysis {
        let language_analysis = LanguageDetector::detect(files);
        let dependency_manager = DependencyManagerDetector::detect(
            repo_path,
            files,
            &language_analysis.detected_language,
            |path| self.reader.read_text(path).ok(),
        );
        tracing::info!(
            language = %language_analysis.detected_language,
            manager = %dependency_manager,
            files = files.len(),
            "repository classified"
        );

        RepositoryAnalysis {
            repo_path: repo_path.to_path_buf(),
            language_analysis,
            dependency_manager,
        }
    }
}
