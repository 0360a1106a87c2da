use super::{DependencyManager, LanguageReport};
use serde::Serialize;
use std::path::PathBuf;

/// Result of inspecting a checked-out repository, saved as `repo_analysis.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryAnalysis {
    pub repo_path: PathBuf,
    pub language_analysis: LanguageReport,
    pub dependency_manager: DependencyManager,
}

impl RepositoryAnalysis {
    pub fn detected_language(&self) -> &str {
        &self.language_analysis.detected_language
    }

    pub fn to_json_pretty(&self) -> crate::shared::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
