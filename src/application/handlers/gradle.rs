use super::{contents_block, platform_program, EcosystemHandler, HandlerContext};
use crate::application::dto::{Ecosystem, HandlerOutcome};
use crate::dependency_tree::{parse_with_dialect, HierarchySerializer, TreeDialect};
use crate::ports::outbound::CommandInvocation;
use crate::repository_analysis::services::{dependencies_task, GradleSettings};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const GRADLE_FILES: &[&str] = &[
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    "settings.gradle.kts",
];
const BUILD_FILES: &[&str] = &["build.gradle", "build.gradle.kts"];
const SETTINGS_FILES: &[&str] = &["settings.gradle", "settings.gradle.kts"];

const RAW_OUTPUT_FILE: &str = "gradle_dependencies.txt";
const COMMAND_FILE: &str = "gradle_dependencies_command.txt";
const TREE_FILE: &str = "gradle_dependency_tree.json";

/// GradleHandler runs the Gradle wrapper's `dependencies` task per project
///
/// Projects come from `settings.gradle(.kts)`, following `includeBuild`
/// into composite builds. All projects of a batch share one wrapper run.
pub struct GradleHandler;

impl GradleHandler {
    pub fn new() -> Self {
        Self
    }

    fn wrapper_name() -> String {
        platform_program("./gradlew", "gradlew.bat")
    }

    /// Gradle project paths (`:`, `:api`, `:build-logic:plugin`) of the repository
    pub fn discover_modules(ctx: &HandlerContext) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut modules = Self::find_modules(ctx, Path::new(""), "", &mut visited);
        modules.sort();
        modules.dedup();
        modules
    }

    fn find_modules(
        ctx: &HandlerContext,
        base: &Path,
        prefix: &str,
        visited: &mut HashSet<PathBuf>,
    ) -> Vec<String> {
        if !visited.insert(base.to_path_buf()) {
            return Vec::new();
        }

        let settings = Self::read_settings(ctx, base);
        let has_build = BUILD_FILES.iter().any(|f| ctx.has_file(&base.join(f)));

        if settings.is_empty() {
            if !has_build {
                return Vec::new();
            }
            let name = prefix.trim_end_matches(':');
            return vec![if name.is_empty() {
                ":".to_string()
            } else {
                format!(":{}", name)
            }];
        }

        let mut modules = settings.project_paths(prefix);
        for build in &settings.include_builds {
            let build_dir = normalize_relative(&base.join(build));
            if ctx.has_directory(&build_dir) {
                let build_name = build.trim_start_matches("./").trim_end_matches('/');
                let sub_prefix = format!("{}{}:", prefix, build_name);
                modules.extend(Self::find_modules(ctx, &build_dir, &sub_prefix, visited));
            } else {
                tracing::debug!(build = %build, "includeBuild directory not found");
            }
        }
        modules
    }

    fn read_settings(ctx: &HandlerContext, base: &Path) -> GradleSettings {
        SETTINGS_FILES
            .iter()
            .map(|name| base.join(name))
            .find(|path| ctx.has_file(path))
            .and_then(|path| match ctx.reader.read_text(&ctx.repo_path.join(&path)) {
                Ok(content) => Some(GradleSettings::parse(&content)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read Gradle settings");
                    None
                }
            })
            .unwrap_or_default()
    }

    fn wrapper_invocation(ctx: &HandlerContext, tasks: &[String]) -> CommandInvocation {
        let program = if cfg!(windows) {
            ctx.repo_path.join("gradlew.bat")
        } else {
            ctx.repo_path.join("gradlew")
        };
        ctx.command(program.to_string_lossy())
            .args(tasks.iter().cloned())
            .current_dir(&ctx.repo_path)
    }
}

/// Collapses `.` and `..` components of a repository-relative path
fn normalize_relative(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

impl Default for GradleHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EcosystemHandler for GradleHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Gradle
    }

    async fn run(&self, ctx: &HandlerContext) -> Result<HandlerOutcome> {
        if ctx.files_named(GRADLE_FILES).is_empty() {
            ctx.report
                .write_line("⏭️ No Gradle project found, skipping dependency tree generation.")?;
            return Ok(HandlerOutcome::Skipped);
        }

        ctx.report
            .write_line("✅ Gradle project detected. Scanning modules...")?;
        let modules = Self::discover_modules(ctx);
        if modules.is_empty() {
            ctx.report
                .write_line("⏭️ No Gradle modules resolved, skipping.")?;
            return Ok(HandlerOutcome::Skipped);
        }
        tracing::info!(count = modules.len(), "gradle modules resolved");

        let tasks: Vec<String> = modules.iter().map(String::as_str).map(dependencies_task).collect();
        let full_command = format!("{} {}", Self::wrapper_name(), tasks.join(" "));
        ctx.artifacts
            .write_artifact(&ctx.artifact_path(COMMAND_FILE), &format!("{}\n", full_command))?;

        let raw_path = ctx.artifact_path(RAW_OUTPUT_FILE);
        ctx.artifacts.write_artifact(
            &raw_path,
            "Full Gradle Dependency Output\n==============================\n",
        )?;

        let batch_size = ctx.settings.gradle_batch_size.max(1);
        let batches: Vec<&[String]> = tasks.chunks(batch_size).collect();
        let total = batches.len();
        let mut combined = String::new();
        let (mut processed, mut failed) = (0, 0);

        for (i, batch) in batches.into_iter().enumerate() {
            let batch_num = i + 1;
            let invocation = Self::wrapper_invocation(ctx, batch);
            let command_line = format!("{} {}", Self::wrapper_name(), batch.join(" "));

            let output = match ctx.runner.run(&invocation).await {
                Ok(output) => output,
                Err(e) => {
                    ctx.report
                        .write_line(&format!("❌ Gradle batch {} failed: {}", batch_num, e))?;
                    failed += 1;
                    continue;
                }
            };

            let text = output.combined();
            ctx.artifacts.append_artifact(
                &raw_path,
                &format!(
                    "\n\n========== Batch {} ==========\nCommand:\n{}\n\n{}\n=======================================\n",
                    batch_num, command_line, text
                ),
            )?;

            if output.success() {
                combined.push_str(&output.stdout);
                combined.push('\n');
                processed += 1;
            } else {
                ctx.report.write_line(&format!(
                    "❌ Gradle batch {} exited with status {}",
                    batch_num,
                    output.status_label()
                ))?;
                failed += 1;
            }
            ctx.progress
                .report_progress(batch_num, total, Some("Gradle batches"));
        }

        let hierarchy = parse_with_dialect(&combined, TreeDialect::Gradle);
        let json = HierarchySerializer::to_json_pretty(&hierarchy)?;
        ctx.artifacts
            .write_artifact(&ctx.artifact_path(TREE_FILE), &json)?;
        ctx.write_report_lines(&contents_block(TREE_FILE, &json))?;

        ctx.report.write_line("\n✅ All batches complete.")?;
        ctx.report.write_line(&format!(
            "📄 Full dependency tree saved at: {}",
            raw_path.display()
        ))?;

        Ok(HandlerOutcome::Completed { processed, failed })
    }
}
