use crate::application::dto::{DependencyTreeRequest, DependencyTreeResponse, EcosystemSummary};
use crate::application::factories::HandlerFactory;
use crate::application::handlers::{EcosystemHandler, HandlerContext};
use crate::ports::outbound::{
    ArtifactWriter, CommandRunner, ProgressReporter, ReportWriter, RepositoryReader,
};
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outbound ports shared by the dependency-tree handlers
#[derive(Clone)]
pub struct ToolPorts {
    pub runner: Arc<dyn CommandRunner>,
    pub reader: Arc<dyn RepositoryReader>,
    pub artifacts: Arc<dyn ArtifactWriter>,
    pub progress: Arc<dyn ProgressReporter>,
}

/// GenerateDependencyTreesUseCase - Section 5 of the report
///
/// Runs the enabled ecosystem handlers one after another in report order.
/// A handler that fails is reported and counted; the remaining handlers
/// still run.
pub struct GenerateDependencyTreesUseCase {
    ports: ToolPorts,
    report: Arc<dyn ReportWriter>,
    handlers: Option<Vec<Box<dyn EcosystemHandler>>>,
}

impl GenerateDependencyTreesUseCase {
    pub fn new(ports: ToolPorts, report: Arc<dyn ReportWriter>) -> Self {
        Self {
            ports,
            report,
            handlers: None,
        }
    }

    /// Replaces the handlers built from the request settings
    pub fn with_handlers(mut self, handlers: Vec<Box<dyn EcosystemHandler>>) -> Self {
        self.handlers = Some(handlers);
        self
    }

    /// Walks the repository and generates every enabled dependency tree
    pub async fn execute(&self, request: DependencyTreeRequest) -> Result<DependencyTreeResponse> {
        let files = self.ports.reader.list_files(&request.repo_path)?;
        self.execute_with_files(request, files).await
    }

    /// Same as `execute` for a repository whose files were already listed
    pub async fn execute_with_files(
        &self,
        request: DependencyTreeRequest,
        files: Vec<PathBuf>,
    ) -> Result<DependencyTreeResponse> {
        let output_root = absolute(&request.output_dir)?;
        ensure_directory(&output_root)?;

        let ctx = HandlerContext {
            repo_path: absolute(&request.repo_path)?,
            output_root,
            files: Arc::new(files),
            runner: Arc::clone(&self.ports.runner),
            reader: Arc::clone(&self.ports.reader),
            artifacts: Arc::clone(&self.ports.artifacts),
            report: Arc::clone(&self.report),
            progress: Arc::clone(&self.ports.progress),
            settings: request.settings,
        };

        let created;
        let handlers = match &self.handlers {
            Some(handlers) => handlers,
            None => {
                created = HandlerFactory::create_enabled(&ctx.settings);
                &created
            }
        };

        self.report.write_section("5", "Dependency Tree")?;
        let mut response = DependencyTreeResponse::default();

        for handler in handlers {
            let ecosystem = handler.ecosystem();
            self.report
                .write_section(ecosystem.section_number(), ecosystem.section_title())?;
            self.ports.progress.report(&format!(
                "🌳 Generating {} dependency trees...",
                ecosystem.section_title()
            ));
            tracing::info!(ecosystem = %ecosystem, "dependency tree phase started");

            let summary = match handler.run(&ctx).await {
                Ok(outcome) => {
                    tracing::info!(ecosystem = %ecosystem, ?outcome, "dependency tree phase finished");
                    EcosystemSummary::new(ecosystem, outcome)
                }
                Err(e) => {
                    tracing::warn!(ecosystem = %ecosystem, error = %format!("{:#}", e), "dependency tree phase failed");
                    self.report.write_line(&format!(
                        "❌ {} dependency tree generation failed:",
                        ecosystem.section_title()
                    ))?;
                    self.report.write_block(&format!("{:#}", e))?;
                    self.ports.progress.report_error(&format!(
                        "❌ {} dependency trees failed: {:#}",
                        ecosystem.section_title(),
                        e
                    ));
                    EcosystemSummary::failed(ecosystem, format!("{:#}", e))
                }
            };
            response.ecosystems.push(summary);
        }

        Ok(response)
    }
}

pub(crate) fn ensure_directory(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| {
        OrchestratorError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Resolves a path against the working directory without touching the filesystem
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    Ok(cwd.join(path))
}
