use crate::shared::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A single external command to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl CommandInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout followed by stderr, the way a terminal would show them
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }

    pub fn status_label(&self) -> String {
        self.status
            .map_or_else(|| "terminated by signal".to_string(), |code| code.to_string())
    }
}

/// CommandRunner port for executing external build tools
///
/// Git, cdxgen, mvn, gradle, pnpm, go and uv are all driven through this
/// port so that ecosystem handlers can be tested without the tools installed.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs a command to completion and captures its output
    ///
    /// # Arguments
    /// * `invocation` - Program, arguments, working directory and timeout
    ///
    /// # Returns
    /// The captured output. A non-zero exit status is NOT an error; callers
    /// decide how to treat it.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The program cannot be found or spawned (`ToolNotFound`)
    /// - The command exceeds its timeout (`CommandTimeout`)
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput>;
}
