use crate::ports::outbound::ArtifactWriter;
use crate::shared::error::OrchestratorError;
use crate::shared::security::validate_write_target;
use crate::shared::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// FileSystemArtifactWriter adapter writing analysis artifacts to disk
pub struct FileSystemArtifactWriter;

impl FileSystemArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    fn prepare(path: &Path) -> Result<()> {
        validate_write_target(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(path, e))?;
        }
        Ok(())
    }
}

impl Default for FileSystemArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_error(path: &Path, e: std::io::Error) -> OrchestratorError {
    OrchestratorError::FileWriteError {
        path: path.to_path_buf(),
        details: e.to_string(),
    }
}

impl ArtifactWriter for FileSystemArtifactWriter {
    fn write_artifact(&self, path: &Path, content: &str) -> Result<()> {
        Self::prepare(path)?;
        fs::write(path, content).map_err(|e| write_error(path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
        Ok(())
    }

    fn append_artifact(&self, path: &Path, content: &str) -> Result<()> {
        Self::prepare(path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| write_error(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| write_error(path, e))?;
        Ok(())
    }
}
