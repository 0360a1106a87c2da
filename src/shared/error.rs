use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI pipelines use these to tell a clean run from one where some
/// ecosystem or analysis step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every step completed
    Success = 0,
    /// The run finished but at least one step or module failed
    PartialFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid path, unreadable file, missing tool, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PartialFailure => write!(f, "Partial Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors raised at the orchestration boundary.
///
/// Parsing dependency-tree text never fails; these cover everything
/// around it (paths, external tools, files on disk).
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing repository directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Invalid repository: {input}\nReason: {reason}\n\n💡 Hint: Use <git-url>[@branch] or a local directory")]
    InvalidRepositorySpec { input: String, reason: String },

    #[error("Required tool not found: {tool}\n\n💡 Hint: {hint}")]
    ToolNotFound { tool: String, hint: String },

    #[error("Command failed: {command}\nExit status: {status}\nDetails: {details}\n\n💡 Hint: Re-run the command manually in the module directory to see the full output")]
    CommandFailed {
        command: String,
        status: String,
        details: String,
    },

    #[error("Command timed out after {seconds}s: {command}\n\n💡 Hint: Raise command_timeout_secs in the config file")]
    CommandTimeout { command: String, seconds: u64 },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("SBOM not found under {path}\n\n💡 Hint: Run without --skip-sbom or place an sbom.json in the repository")]
    SbomNotFound { path: PathBuf },

    /// Validation error for settings and requests
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
