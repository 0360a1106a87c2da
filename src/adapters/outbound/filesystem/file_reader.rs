use crate::ports::outbound::RepositoryReader;
use crate::shared::error::OrchestratorError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading repository files
///
/// This adapter implements the RepositoryReader port. Walking ignores
/// `.gitignore` rules on purpose: build manifests are sometimes generated
/// into ignored folders and still describe real dependencies.
pub struct FileSystemReader {
    max_file_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Reader with a lower size ceiling (framework search uses 2 MB)
    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Validate file is a regular file
    /// - Check file size limits
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        validate_regular_file(path, "file")?;

        let metadata = fs::metadata(path).map_err(|e| OrchestratorError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        validate_file_size(metadata.len(), path, self.max_file_size)?;

        fs::read_to_string(path).map_err(|e| {
            OrchestratorError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryReader for FileSystemReader {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(OrchestratorError::InvalidProjectPath {
                path: root.to_path_buf(),
                reason: "Directory does not exist".to_string(),
            }
            .into());
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .filter_entry(|entry| entry.file_name() != ".git")
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }

        tracing::debug!(root = %root.display(), files = files.len(), "walked repository");
        Ok(files)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.safe_read_file(path)
    }
}
