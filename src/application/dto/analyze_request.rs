use super::AnalysisSettings;
use crate::repository_analysis::domain::RepositorySpec;
use crate::shared::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_REPORT_FILE: &str = "report.txt";
pub const DEFAULT_CLONE_DIR: &str = "repos";

/// Repository to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    /// Cloned into the clone directory before analysis
    Remote(RepositorySpec),
    /// Already checked out
    Local(PathBuf),
}

impl RepositorySource {
    /// Interprets a CLI argument: an existing directory is local, anything else a git URL
    pub fn resolve(input: &str) -> Result<Self> {
        let path = Path::new(input);
        if path.is_dir() {
            return Ok(RepositorySource::Local(path.to_path_buf()));
        }
        Ok(RepositorySource::Remote(RepositorySpec::parse(input)?))
    }

    pub fn display_name(&self) -> String {
        match self {
            RepositorySource::Remote(spec) => spec.to_string(),
            RepositorySource::Local(path) => path.display().to_string(),
        }
    }
}

/// AnalyzeRequest - Request DTO for a full repository analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub source: RepositorySource,
    /// Directory receiving every generated artifact
    pub output_dir: PathBuf,
    /// Consolidated report file
    pub report_path: PathBuf,
    /// Parent directory for clones of remote repositories
    pub clone_dir: PathBuf,
    pub settings: AnalysisSettings,
}

impl AnalyzeRequest {
    pub fn new(
        source: RepositorySource,
        output_dir: PathBuf,
        report_path: PathBuf,
        clone_dir: PathBuf,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            source,
            output_dir,
            report_path,
            clone_dir,
            settings,
        }
    }
}

/// DependencyTreeRequest - Request DTO for the dependency-tree phase alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTreeRequest {
    pub repo_path: PathBuf,
    pub output_dir: PathBuf,
    pub settings: AnalysisSettings,
}

impl DependencyTreeRequest {
    pub fn new(repo_path: PathBuf, output_dir: PathBuf, settings: AnalysisSettings) -> Self {
        Self {
            repo_path,
            output_dir,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_directory_is_local() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = RepositorySource::resolve(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(source, RepositorySource::Local(dir.path().to_path_buf()));
    }

    #[test]
    fn test_url_is_remote() {
        let source =
            RepositorySource::resolve("https://github.com/acme/shop.git@develop").unwrap();
        match source {
            RepositorySource::Remote(spec) => {
                assert_eq!(spec.name(), "shop");
                assert_eq!(spec.branch(), Some("develop"));
            }
            other => panic!("expected remote source, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(RepositorySource::resolve("https://github.com/acme/shop.git@@").is_err());
    }
}
