use super::server::ToolBackend;
use super::tools::{CloneArgs, ComponentArgs, RepoArgs, StepArgs, Tool, TreeArgs};
use crate::application::dto::{
    AnalysisSettings, DependencyTreeRequest, DependencyTreeResponse, HandlerOutcome,
    DEFAULT_REPORT_FILE,
};
use crate::application::use_cases::{
    absolute, ensure_directory, AnalyzeRepositoryUseCase, DetectRepositoryUseCase,
    GenerateDependencyTreesUseCase, ToolPorts, COMPONENTS_FILE, FRAMEWORKS_FILE,
};
use crate::ports::outbound::{ReportWriter, RepositoryCloner, RepositoryReader, SbomTool};
use crate::repository_analysis::domain::RepositorySpec;
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opens the report a tool call appends its section to
pub type ReportOpener = Arc<dyn Fn(&Path) -> Result<Arc<dyn ReportWriter>> + Send + Sync>;

/// Destinations and settings used when a tool call leaves them out
#[derive(Debug, Clone)]
pub struct ToolDefaults {
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub clone_dir: PathBuf,
    pub settings: AnalysisSettings,
}

/// PipelineTools - Runs each MCP tool through the analysis use cases
///
/// Every call is independent: it walks the repository again and opens the
/// report in append mode, so a client can run the steps in any order.
pub struct PipelineTools {
    ports: ToolPorts,
    cloner: Arc<dyn RepositoryCloner>,
    sbom_tool: Arc<dyn SbomTool>,
    scan_reader: Arc<dyn RepositoryReader>,
    open_report: ReportOpener,
    defaults: ToolDefaults,
}

impl PipelineTools {
    pub fn new(
        ports: ToolPorts,
        cloner: Arc<dyn RepositoryCloner>,
        sbom_tool: Arc<dyn SbomTool>,
        scan_reader: Arc<dyn RepositoryReader>,
        open_report: ReportOpener,
        defaults: ToolDefaults,
    ) -> Self {
        Self {
            ports,
            cloner,
            sbom_tool,
            scan_reader,
            open_report,
            defaults,
        }
    }

    /// Output directory and report path; the report follows an explicit output directory
    fn destinations(&self, step: &StepArgs) -> Result<(PathBuf, PathBuf)> {
        let output_dir = step
            .output_dir
            .clone()
            .unwrap_or_else(|| self.defaults.output_dir.clone());
        let report_path = match (&step.report_file, &step.output_dir) {
            (Some(report), _) => report.clone(),
            (None, Some(dir)) => dir.join(DEFAULT_REPORT_FILE),
            (None, None) => self.defaults.report_path.clone(),
        };

        let output_dir = absolute(&output_dir)?;
        ensure_directory(&output_dir)?;
        Ok((output_dir, absolute(&report_path)?))
    }

    fn pipeline(&self, report: Arc<dyn ReportWriter>) -> AnalyzeRepositoryUseCase {
        AnalyzeRepositoryUseCase::new(
            self.ports.clone(),
            Arc::clone(&self.cloner),
            Arc::clone(&self.sbom_tool),
            Arc::clone(&self.scan_reader),
            report,
        )
    }

    fn detector(&self) -> DetectRepositoryUseCase<Arc<dyn RepositoryReader>> {
        DetectRepositoryUseCase::new(Arc::clone(&self.ports.reader))
    }

    async fn clone_repo(&self, args: CloneArgs) -> Result<String> {
        let spec = RepositorySpec::parse(&args.repo_with_branch)?;
        let clone_dir = absolute(
            args.clone_dir
                .as_deref()
                .unwrap_or(self.defaults.clone_dir.as_path()),
        )?;
        let path = self.cloner.clone_repository(&spec, &clone_dir).await?;
        Ok(format!(
            "✅ Repository cloned successfully at {}",
            path.display()
        ))
    }

    fn analyze_repo(&self, args: StepArgs) -> Result<String> {
        let repo_path = local_repository(&args.repo_path)?;
        let (output_dir, report_path) = self.destinations(&args)?;

        let detector = self.detector();
        let files = detector.list_files(&repo_path)?;
        let analysis = detector.analyze(&repo_path, &files);
        self.pipeline((self.open_report)(&report_path)?)
            .write_analysis(&analysis, &output_dir)?;
        analysis.to_json_pretty()
    }

    async fn generate_sbom(&self, args: RepoArgs) -> Result<String> {
        let repo_path = local_repository(&args.repo_path)?;
        let sbom_path = self.sbom_tool.generate(&repo_path).await?;
        Ok(format!(
            "✅ SBOM generation completed.\n📁 Repo path: {}\n📄 SBOM file: {}",
            repo_path.display(),
            sbom_path.display()
        ))
    }

    async fn extract_components(&self, args: ComponentArgs) -> Result<String> {
        let repo_path = local_repository(&args.step.repo_path)?;
        let (output_dir, report_path) = self.destinations(&args.step)?;
        let mut settings = self.defaults.settings.clone();
        settings.skip_sbom |= args.skip_sbom;

        let files = self.detector().list_files(&repo_path)?;
        let catalog = self
            .pipeline((self.open_report)(&report_path)?)
            .extract_components(&repo_path, &files, &output_dir, &settings)
            .await?;
        Ok(format!(
            "{}\n💾 Components saved to {}",
            catalog.render().trim_end(),
            output_dir.join(COMPONENTS_FILE).display()
        ))
    }

    /// Reads the frameworks from the `sbom.json` already in the repository
    async fn search_frameworks(&self, args: StepArgs) -> Result<String> {
        let repo_path = local_repository(&args.repo_path)?;
        let (output_dir, report_path) = self.destinations(&args)?;
        let mut settings = self.defaults.settings.clone();
        settings.skip_sbom = true;
        settings.skip_frameworks = false;

        let files = self.detector().list_files(&repo_path)?;
        let pipeline = self.pipeline((self.open_report)(&report_path)?);
        let sbom_path = pipeline.locate_sbom(&repo_path, &files, &settings).await?;
        let catalog = pipeline.read_components(&sbom_path, &settings)?;
        let count = pipeline.search_frameworks(&repo_path, &files, &catalog, &output_dir, &settings)?;
        Ok(format!(
            "🔍 {} framework import(s) found for {} framework(s)\n📄 Results: {}",
            count,
            catalog.frameworks().len(),
            output_dir.join(FRAMEWORKS_FILE).display()
        ))
    }

    async fn generate_dependency_tree(&self, args: TreeArgs) -> Result<String> {
        let repo_path = local_repository(&args.step.repo_path)?;
        let (output_dir, report_path) = self.destinations(&args.step)?;
        let settings = self
            .defaults
            .settings
            .clone()
            .with_ecosystems(&args.parsed_ecosystems()?);

        let use_case =
            GenerateDependencyTreesUseCase::new(self.ports.clone(), (self.open_report)(&report_path)?);
        let response = use_case
            .execute(DependencyTreeRequest::new(repo_path, output_dir.clone(), settings))
            .await?;
        Ok(render_tree_summary(&response, &output_dir))
    }
}

#[async_trait]
impl ToolBackend for PipelineTools {
    async fn call(&self, tool: Tool, arguments: Value) -> Result<String> {
        match tool {
            Tool::CloneRepo => self.clone_repo(tool.arguments(arguments)?).await,
            Tool::AnalyzeRepo => self.analyze_repo(tool.arguments(arguments)?),
            Tool::GenerateSbom => self.generate_sbom(tool.arguments(arguments)?).await,
            Tool::ExtractSbomComponents => {
                self.extract_components(tool.arguments(arguments)?).await
            }
            Tool::SearchFrameworks => self.search_frameworks(tool.arguments(arguments)?).await,
            Tool::GenerateDependencyTree => {
                self.generate_dependency_tree(tool.arguments(arguments)?).await
            }
        }
    }
}

fn local_repository(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(OrchestratorError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }
    absolute(path)
}

fn render_tree_summary(response: &DependencyTreeResponse, output_dir: &Path) -> String {
    let mut text = format!("🌳 Dependency trees written to {}", output_dir.display());
    for summary in &response.ecosystems {
        let _ = match (&summary.error, summary.outcome) {
            (Some(error), _) => write!(text, "\n❌ {}: {}", summary.ecosystem, error),
            (None, HandlerOutcome::Skipped) => write!(text, "\n⏭️ {}: skipped", summary.ecosystem),
            (None, HandlerOutcome::Completed { processed, failed }) => write!(
                text,
                "\n{} {}: {} processed, {} failed",
                if failed > 0 { "⚠️" } else { "✅" },
                summary.ecosystem,
                processed,
                failed
            ),
        };
    }
    text
}
