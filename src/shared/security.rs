use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a file read through the filesystem adapter (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Files above this size are skipped by framework search (2 MB)
pub const MAX_SCAN_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Rejects an output path that already exists as a symbolic link
///
/// Missing paths pass; the caller creates them.
pub fn validate_write_target(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(OrchestratorError::FileWriteError {
            path: path.to_path_buf(),
            details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}

/// Validates that a path exists and is a regular file
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "pom.xml", "dependency tree")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| OrchestratorError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(OrchestratorError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the resolved path instead of the link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds `max_size`
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(OrchestratorError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "file is too large ({} bytes, maximum is {} bytes)",
                file_size, max_size
            ),
            hint: "Split the input or raise the limit".to_string(),
        }
        .into());
    }
    Ok(())
}
