use crate::ports::outbound::{CommandInvocation, CommandRunner, ProgressReporter, SbomTool, SBOM_FILE_NAME};
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CdxgenSbomTool adapter generating CycloneDX SBOMs with cdxgen
///
/// Uses a globally installed `cdxgen` and falls back to `npx cdxgen` when
/// the binary is missing. An existing `sbom.json` is reused.
pub struct CdxgenSbomTool {
    runner: Arc<dyn CommandRunner>,
    progress: Arc<dyn ProgressReporter>,
}

impl CdxgenSbomTool {
    pub fn new(runner: Arc<dyn CommandRunner>, progress: Arc<dyn ProgressReporter>) -> Self {
        Self { runner, progress }
    }

    fn invocation(repo_path: &Path, sbom_path: &Path) -> CommandInvocation {
        CommandInvocation::new("cdxgen")
            .args(["-r", "--json-pretty", "-o"])
            .arg(sbom_path.to_string_lossy())
            .current_dir(repo_path)
    }
}

#[async_trait]
impl SbomTool for CdxgenSbomTool {
    async fn generate(&self, repo_path: &Path) -> Result<PathBuf> {
        let sbom_path = repo_path.join(SBOM_FILE_NAME);
        if sbom_path.is_file() {
            self.progress
                .report(&format!("✔ Reusing existing SBOM: {}", sbom_path.display()));
            return Ok(sbom_path);
        }

        self.progress.report("🧾 Generating SBOM with cdxgen...");
        let invocation = Self::invocation(repo_path, &sbom_path);

        let output = match self.runner.run(&invocation).await {
            Ok(output) => output,
            Err(e) if is_tool_missing(&e) => {
                tracing::info!("cdxgen not on PATH, falling back to npx");
                let fallback = CommandInvocation::new("npx")
                    .arg("cdxgen")
                    .args(invocation.arguments().iter().cloned())
                    .current_dir(repo_path);
                self.runner.run(&fallback).await?
            }
            Err(e) => return Err(e),
        };

        if !output.success() || !sbom_path.is_file() {
            return Err(OrchestratorError::CommandFailed {
                command: invocation.to_string(),
                status: output.status_label(),
                details: output.combined().trim().to_string(),
            }
            .into());
        }

        self.progress
            .report(&format!("✅ SBOM generated: {}", sbom_path.display()));
        Ok(sbom_path)
    }
}

fn is_tool_missing(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<OrchestratorError>(),
        Some(OrchestratorError::ToolNotFound { .. })
    )
}
