use super::generate_dependency_trees::{absolute, ensure_directory};
use super::{DetectRepositoryUseCase, GenerateDependencyTreesUseCase, ToolPorts};
use crate::application::dto::{
    AnalysisResponse, AnalysisSettings, AnalyzeRequest, DependencyTreeRequest, RepositorySource,
};
use crate::application::handlers::EcosystemHandler;
use crate::ports::outbound::{ReportWriter, RepositoryCloner, RepositoryReader, SbomTool, SBOM_FILE_NAME};
use crate::repository_analysis::domain::{render_framework_usages, ComponentCatalog, RepositoryAnalysis};
use crate::repository_analysis::services::{ComponentExtractor, FrameworkMatcher};
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const ANALYSIS_FILE: &str = "repo_analysis.json";
pub const COMPONENTS_FILE: &str = "output.txt";
pub const FRAMEWORKS_FILE: &str = "frame.txt";

/// AnalyzeRepositoryUseCase - The full clone-to-report pipeline
///
/// Sections are written in order: repository, analysis, SBOM components,
/// framework usage and dependency trees. Only a repository that cannot be
/// obtained or walked aborts the run; later steps record their failure in
/// `failed_steps` and the pipeline goes on.
pub struct AnalyzeRepositoryUseCase {
    ports: ToolPorts,
    cloner: Arc<dyn RepositoryCloner>,
    sbom_tool: Arc<dyn SbomTool>,
    scan_reader: Arc<dyn RepositoryReader>,
    report: Arc<dyn ReportWriter>,
    trees: GenerateDependencyTreesUseCase,
}

impl AnalyzeRepositoryUseCase {
    /// Creates the use case
    ///
    /// # Arguments
    /// * `ports` - Command runner, reader, artifact writer and progress reporter
    /// * `cloner` - Clones remote repositories
    /// * `sbom_tool` - Generates `sbom.json`
    /// * `scan_reader` - Reader used for framework search (lower size limit)
    /// * `report` - Consolidated report sink
    pub fn new(
        ports: ToolPorts,
        cloner: Arc<dyn RepositoryCloner>,
        sbom_tool: Arc<dyn SbomTool>,
        scan_reader: Arc<dyn RepositoryReader>,
        report: Arc<dyn ReportWriter>,
    ) -> Self {
        let trees = GenerateDependencyTreesUseCase::new(ports.clone(), Arc::clone(&report));
        Self {
            ports,
            cloner,
            sbom_tool,
            scan_reader,
            report,
            trees,
        }
    }

    /// Replaces the ecosystem handlers of the dependency-tree phase
    pub fn with_tree_handlers(mut self, handlers: Vec<Box<dyn EcosystemHandler>>) -> Self {
        self.trees = self.trees.with_handlers(handlers);
        self
    }

    pub async fn execute(&self, request: AnalyzeRequest) -> Result<AnalysisResponse> {
        let output_dir = absolute(&request.output_dir)?;
        ensure_directory(&output_dir)?;
        let mut failed_steps = Vec::new();

        // Step 1: Header and repository
        self.write_header(&request)?;
        let repo_path = self.obtain_repository(&request).await?;

        // Step 2: Language and dependency manager
        let detector = DetectRepositoryUseCase::new(Arc::clone(&self.ports.reader));
        let files = detector.list_files(&repo_path)?;
        let analysis = detector.analyze(&repo_path, &files);
        if let Err(e) = self.write_analysis(&analysis, &output_dir) {
            self.step_failed(&mut failed_steps, "analysis", &e)?;
        }

        // Step 3: SBOM components
        let catalog = match self
            .extract_components(&repo_path, &files, &output_dir, &request.settings)
            .await
        {
            Ok(catalog) => catalog,
            Err(e) => {
                self.step_failed(&mut failed_steps, "components", &e)?;
                ComponentCatalog::default()
            }
        };

        // Step 4: Framework usage
        if let Err(e) = self.search_frameworks(&repo_path, &files, &catalog, &output_dir, &request.settings) {
            self.step_failed(&mut failed_steps, "frameworks", &e)?;
        }

        // Step 5: Dependency trees
        let trees = self
            .trees
            .execute_with_files(
                DependencyTreeRequest::new(repo_path.clone(), output_dir, request.settings.clone()),
                files,
            )
            .await?;

        self.report.write_separator()?;
        let response = AnalysisResponse {
            repo_path,
            report_path: request.report_path,
            analysis,
            ecosystems: trees.ecosystems,
            failed_steps,
        };

        if response.is_complete() {
            self.ports
                .progress
                .report_completion(&format!("Analysis complete: {}", response.report_path.display()));
        } else {
            self.ports.progress.report_error(&format!(
                "⚠️  Analysis finished with failures, see {}",
                response.report_path.display()
            ));
        }
        Ok(response)
    }

    fn write_header(&self, request: &AnalyzeRequest) -> Result<()> {
        self.report.write_separator()?;
        self.report.write_line("SBOM Orchestrator Report")?;
        self.report
            .write_line(&format!("Run ID: {}", uuid::Uuid::new_v4()))?;
        self.report
            .write_line(&format!("Generated: {}", chrono::Utc::now().to_rfc3339()))?;
        self.report
            .write_line(&format!("Repository: {}", request.source.display_name()))?;
        self.report.write_separator()
    }

    async fn obtain_repository(&self, request: &AnalyzeRequest) -> Result<PathBuf> {
        self.report.write_section("1", "Repository")?;
        let repo_path = match &request.source {
            RepositorySource::Remote(spec) => {
                let clone_dir = absolute(&request.clone_dir)?;
                let path = self.cloner.clone_repository(spec, &clone_dir).await?;
                self.report.write_line(&format!("🔗 Repository URL: {}", spec.url()))?;
                self.report.write_line(&format!(
                    "🌿 Branch: {}",
                    spec.branch().unwrap_or("default")
                ))?;
                path
            }
            RepositorySource::Local(path) => {
                if !path.is_dir() {
                    return Err(OrchestratorError::InvalidProjectPath {
                        path: path.clone(),
                        reason: "Directory does not exist".to_string(),
                    }
                    .into());
                }
                path.clone()
            }
        };

        let repo_path = absolute(&repo_path)?;
        self.report
            .write_line(&format!("📁 Local path: {}", repo_path.display()))?;
        Ok(repo_path)
    }

    /// Section 2: writes the classification and `repo_analysis.json`
    pub fn write_analysis(&self, analysis: &RepositoryAnalysis, output_dir: &Path) -> Result<()> {
        self.report.write_section("2", "Repository Analysis")?;
        for line in analysis.language_analysis.summary_lines() {
            self.report.write_line(&line)?;
        }
        self.report.write_line(&format!(
            "📦 Dependency manager: {}",
            analysis.dependency_manager
        ))?;

        let json = analysis.to_json_pretty()?;
        let path = output_dir.join(ANALYSIS_FILE);
        self.ports.artifacts.write_artifact(&path, &json)?;
        self.report
            .write_line(&format!("💾 Analysis saved to {}", path.display()))
    }

    /// Section 3: generates (or finds) the SBOM and writes `output.txt`
    pub async fn extract_components(
        &self,
        repo_path: &Path,
        files: &[PathBuf],
        output_dir: &Path,
        settings: &AnalysisSettings,
    ) -> Result<ComponentCatalog> {
        self.report.write_section("3", "SBOM Components")?;
        if settings.skip_sbom {
            self.report.write_line("⏭️ SBOM generation skipped.")?;
        }
        let sbom_path = self.locate_sbom(repo_path, files, settings).await?;
        self.report
            .write_line(&format!("🧾 SBOM: {}", sbom_path.display()))?;

        let catalog = self.read_components(&sbom_path, settings)?;
        let rendered = catalog.render();
        self.ports
            .artifacts
            .write_artifact(&output_dir.join(COMPONENTS_FILE), &rendered)?;
        self.report.write_block(&rendered)?;
        Ok(catalog)
    }

    /// Runs cdxgen, or with `skip_sbom` finds the first `sbom.json` in walk order
    pub async fn locate_sbom(
        &self,
        repo_path: &Path,
        files: &[PathBuf],
        settings: &AnalysisSettings,
    ) -> Result<PathBuf> {
        if !settings.skip_sbom {
            return self.sbom_tool.generate(repo_path).await;
        }
        files
            .iter()
            .find(|f| f.file_name().is_some_and(|n| n == SBOM_FILE_NAME))
            .map(|f| repo_path.join(f))
            .ok_or_else(|| {
                OrchestratorError::SbomNotFound {
                    path: repo_path.to_path_buf(),
                }
                .into()
            })
    }

    pub fn read_components(&self, sbom_path: &Path, settings: &AnalysisSettings) -> Result<ComponentCatalog> {
        let sbom_json = self.ports.reader.read_text(sbom_path)?;
        ComponentExtractor::new(settings.component_types.clone())
            .extract(&sbom_json)
            .with_context(|| format!("Failed to extract components from {}", sbom_path.display()))
    }

    /// Section 4: searches framework imports and writes `frame.txt`
    ///
    /// Returns the number of matching lines.
    pub fn search_frameworks(
        &self,
        repo_path: &Path,
        files: &[PathBuf],
        catalog: &ComponentCatalog,
        output_dir: &Path,
        settings: &AnalysisSettings,
    ) -> Result<usize> {
        self.report.write_section("4", "Framework Usage")?;
        if settings.skip_frameworks {
            self.report.write_line("⏭️ Framework search skipped.")?;
            return Ok(0);
        }

        self.ports.progress.report(&format!(
            "🔍 Searching {} framework(s) in {} file(s)...",
            catalog.frameworks().len(),
            files.len()
        ));
        let matcher = FrameworkMatcher::new(|path: &Path| {
            self.scan_reader.read_text(&repo_path.join(path)).ok()
        });
        let usages = matcher.search(catalog.frameworks(), files);

        let rendered = render_framework_usages(&usages);
        self.ports
            .artifacts
            .write_artifact(&output_dir.join(FRAMEWORKS_FILE), &rendered)?;
        self.report.write_block(&rendered)?;
        Ok(usages.iter().map(|usage| usage.matches.len()).sum())
    }

    fn step_failed(&self, failed_steps: &mut Vec<String>, step: &str, error: &anyhow::Error) -> Result<()> {
        tracing::warn!(step, error = %error, "analysis step failed");
        failed_steps.push(step.to_string());
        self.report.write_line(&format!("❌ Step '{}' failed:", step))?;
        self.report.write_block(&format!("{:#}", error))?;
        self.ports
            .progress
            .report_error(&format!("❌ {} step failed: {:#}", step, error));
        Ok(())
    }
}
