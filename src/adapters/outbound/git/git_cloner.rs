use crate::ports::outbound::{CommandInvocation, CommandRunner, ProgressReporter, RepositoryCloner};
use crate::repository_analysis::domain::RepositorySpec;
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// GitCloner adapter cloning repositories with the `git` CLI
///
/// An existing checkout directory is reused instead of cloned again.
pub struct GitCloner {
    runner: Arc<dyn CommandRunner>,
    progress: Arc<dyn ProgressReporter>,
}

impl GitCloner {
    pub fn new(runner: Arc<dyn CommandRunner>, progress: Arc<dyn ProgressReporter>) -> Self {
        Self { runner, progress }
    }

    async fn git(&self, args: &[&str], cwd: Option<&Path>) -> Result<()> {
        let mut invocation = CommandInvocation::new("git").args(args.iter().copied());
        if let Some(dir) = cwd {
            invocation = invocation.current_dir(dir);
        }

        let output = self.runner.run(&invocation).await?;
        if !output.success() {
            return Err(OrchestratorError::CommandFailed {
                command: invocation.to_string(),
                status: output.status_label(),
                details: output.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl RepositoryCloner for GitCloner {
    async fn clone_repository(&self, spec: &RepositorySpec, base_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(base_dir).map_err(|e| OrchestratorError::FileWriteError {
            path: base_dir.to_path_buf(),
            details: e.to_string(),
        })?;
        let repo_path = base_dir.join(spec.name());

        if repo_path.exists() {
            self.progress
                .report(&format!("✔ Repository '{}' already exists", spec.name()));
        } else {
            self.progress.report(&format!(
                "📥 Cloning {} into {}",
                spec.url(),
                repo_path.display()
            ));
            let target = repo_path.to_string_lossy();
            self.git(&["clone", spec.url(), target.as_ref()], None).await?;
        }

        match spec.branch() {
            Some(branch) => {
                self.progress
                    .report(&format!("🔄 Checking out branch: {}", branch));
                self.git(&["fetch", "--all"], Some(&repo_path)).await?;
                self.git(&["checkout", branch], Some(&repo_path)).await?;
            }
            None => self.progress.report("✔ Using default branch"),
        }

        Ok(repo_path)
    }
}
