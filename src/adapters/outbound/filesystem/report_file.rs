use crate::ports::outbound::ReportWriter;
use crate::shared::error::OrchestratorError;
use crate::shared::security::validate_write_target;
use crate::shared::Result;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// ReportFile adapter appending UTF-8 lines to the consolidated report
///
/// The file handle is opened once; a mutex keeps lines from concurrent
/// writers whole.
pub struct ReportFile {
    path: PathBuf,
    file: Mutex<File>,
}

impl ReportFile {
    /// Opens (creating if needed) the report for appending
    ///
    /// # Errors
    /// Returns an error if the path is a symbolic link or cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        validate_write_target(&path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(&path, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| write_error(&path, e))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_error(path: &Path, e: std::io::Error) -> OrchestratorError {
    OrchestratorError::FileWriteError {
        path: path.to_path_buf(),
        details: e.to_string(),
    }
}

impl ReportWriter for ReportFile {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("Report file lock poisoned"))?;
        writeln!(file, "{}", line).map_err(|e| write_error(&self.path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lines_are_appended() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports/report.txt");

        let report = ReportFile::open(&path).unwrap();
        report.write_line("first").unwrap();
        report.write_section("2", "Repository Analysis").unwrap();
        report.write_block("a\nb").unwrap();
        report.write_separator().unwrap();

        let content = fs::read_to_string(report.path()).unwrap();
        assert_eq!(
            content,
            "first\n\n-----Section 2: Repository Analysis-----\na\nb\n---------------------------------------------------\n"
        );
    }

    #[test]
    fn test_reopen_keeps_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        ReportFile::open(&path).unwrap().write_line("one").unwrap();
        ReportFile::open(&path).unwrap().write_line("two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
