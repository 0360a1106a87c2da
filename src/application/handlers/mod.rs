/// Ecosystem handlers producing dependency trees with each build tool
///
/// A handler discovers its manifests in the repository file list, drives
/// the build tool through the `CommandRunner` port, saves raw and JSON
/// artifacts in the output directory and appends the JSON to the report.
mod go;
mod gradle;
mod maven;
mod node;
mod python;

pub use go::GoHandler;
pub use gradle::GradleHandler;
pub use maven::MavenHandler;
pub use node::NodeHandler;
pub use python::PythonHandler;

use crate::application::dto::{AnalysisSettings, Ecosystem, HandlerOutcome};
use crate::ports::outbound::{
    ArtifactWriter, CommandInvocation, CommandOutput, CommandRunner, ProgressReporter,
    ReportWriter, RepositoryReader, SECTION_SEPARATOR,
};
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// EcosystemHandler - one build ecosystem's dependency-tree generator
#[async_trait]
pub trait EcosystemHandler: Send + Sync {
    fn ecosystem(&self) -> Ecosystem;

    /// Generates the dependency trees of every module of this ecosystem
    ///
    /// # Returns
    /// `Skipped` when the repository has no module of this ecosystem,
    /// otherwise the number of processed and failed modules. A failing
    /// module is reported and does not stop the others.
    ///
    /// # Errors
    /// Returns an error when the whole ecosystem cannot be handled, e.g.
    /// the build tool is missing or the report cannot be written.
    async fn run(&self, ctx: &HandlerContext) -> Result<HandlerOutcome>;
}

/// Everything a handler needs about the repository and the run
#[derive(Clone)]
pub struct HandlerContext {
    /// Absolute path of the checked-out repository
    pub repo_path: PathBuf,
    /// Absolute directory receiving the generated artifacts
    pub output_root: PathBuf,
    /// Repository files relative to `repo_path`, in walk order
    pub files: Arc<Vec<PathBuf>>,
    pub runner: Arc<dyn CommandRunner>,
    pub reader: Arc<dyn RepositoryReader>,
    pub artifacts: Arc<dyn ArtifactWriter>,
    pub report: Arc<dyn ReportWriter>,
    pub progress: Arc<dyn ProgressReporter>,
    pub settings: AnalysisSettings,
}

impl HandlerContext {
    /// Relative paths of the files with one of the given names, in walk order
    pub fn files_named(&self, names: &[&str]) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| names.contains(&n))
            })
            .cloned()
            .collect()
    }

    /// True when the repository contains `relative` as a file
    pub fn has_file(&self, relative: &Path) -> bool {
        self.files.iter().any(|f| f == relative)
    }

    /// True when some repository file lives under `relative`
    pub fn has_directory(&self, relative: &Path) -> bool {
        self.files
            .iter()
            .any(|f| f.starts_with(relative) && f.as_path() != relative)
    }

    /// Absolute directory of a manifest given by its relative path
    pub fn module_dir(&self, manifest: &Path) -> PathBuf {
        match manifest.parent() {
            Some(parent) => self.repo_path.join(parent),
            None => self.repo_path.clone(),
        }
    }

    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_root.join(file_name)
    }

    /// Invocation carrying the configured command timeout
    pub fn command(&self, program: impl Into<String>) -> CommandInvocation {
        CommandInvocation::new(program).timeout(self.settings.command_timeout)
    }

    /// Runs a command and turns a non-zero exit status into `CommandFailed`
    pub async fn run_checked(&self, invocation: &CommandInvocation) -> Result<CommandOutput> {
        let output = self.runner.run(invocation).await?;
        if !output.success() {
            return Err(OrchestratorError::CommandFailed {
                command: invocation.to_string(),
                status: output.status_label(),
                details: output.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }

    pub fn write_report_lines(&self, lines: &[String]) -> Result<()> {
        for line in lines {
            self.report.write_line(line)?;
        }
        Ok(())
    }

    /// Number of modules processed at the same time, never below one
    pub fn concurrency(&self) -> usize {
        self.settings.module_concurrency.max(1)
    }
}

/// Report lines showing a saved JSON artifact followed by a separator
pub(crate) fn contents_block(file_name: &str, json: &str) -> Vec<String> {
    let mut lines = vec![format!("\n--- Contents of {} ---", file_name)];
    lines.extend(json.lines().map(str::to_string));
    lines.push(format!("\n{}", SECTION_SEPARATOR));
    lines
}

/// Executable name, with the Windows launcher suffix where needed
pub(crate) fn platform_program(unix: &str, windows: &str) -> String {
    if cfg!(windows) {
        windows.to_string()
    } else {
        unix.to_string()
    }
}
