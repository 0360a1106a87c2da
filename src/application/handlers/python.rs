use super::{contents_block, EcosystemHandler, HandlerContext};
use crate::application::dto::{Ecosystem, HandlerOutcome};
use crate::dependency_tree::services::pipgrip_normalizer::PythonDependencyDocument;
use crate::dependency_tree::services::PipgripNormalizer;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFESTS: &[&str] = &["pyproject.toml", "requirements.txt"];
const COMBINED_FILE: &str = "python_dependencies_combined.json";

/// One manifest's normalized dependencies in the combined document
#[derive(Debug, Clone, Serialize)]
pub struct PythonSourceEntry {
    pub source_file: String,
    pub project_path: String,
    pub data: PythonDependencyDocument,
}

#[derive(Debug, Clone, Default, Serialize)]
struct CombinedDocument {
    python_dependencies: Vec<PythonSourceEntry>,
}

/// PythonHandler resolves Python manifests with uv and pipgrip
///
/// Every manifest gets a throwaway virtual environment inside a temporary
/// directory, removed when the manifest is done.
pub struct PythonHandler;

impl PythonHandler {
    pub fn new() -> Self {
        Self
    }

    fn venv_executable(venv: &Path, name: &str) -> PathBuf {
        if cfg!(windows) {
            venv.join("Scripts").join(format!("{}.exe", name))
        } else {
            venv.join("bin").join(name)
        }
    }

    async fn process_manifest(
        ctx: &HandlerContext,
        index: usize,
        manifest: PathBuf,
    ) -> (Vec<String>, Option<PythonSourceEntry>) {
        let mut lines = vec![format!("\n📦 Processing Python dependency file: {}", manifest.display())];
        match Self::resolve(ctx, index, &manifest).await {
            Ok(entry) => {
                lines.push(format!("✅ Normalization file generated → python_normalization_{}.json", index));
                (lines, Some(entry))
            }
            Err(e) => {
                tracing::warn!(manifest = %manifest.display(), error = %e, "python manifest failed");
                lines.push(format!("❌ Failed processing {}: {:#}", manifest.display(), e));
                (lines, None)
            }
        }
    }

    async fn resolve(ctx: &HandlerContext, index: usize, manifest: &Path) -> Result<PythonSourceEntry> {
        let project_dir = ctx.module_dir(manifest);
        let manifest_path = ctx.repo_path.join(manifest);
        let all_dep = ctx.artifact_path(&format!("python_all-dep_{}.txt", index));

        let workspace = TempDir::new().context("Failed to create a temporary directory for the virtual environment")?;
        let venv = workspace.path().join("venv");

        ctx.run_checked(&ctx.command("uv").arg("venv").arg(venv.to_string_lossy()))
            .await?;

        let python = Self::venv_executable(&venv, "python");
        ctx.run_checked(
            &ctx.command("uv")
                .args(["pip", "install", "pipgrip", "--python"])
                .arg(python.to_string_lossy()),
        )
        .await?;

        let mut compile = ctx.command("uv").args(["pip", "compile"]);
        if manifest.file_name().is_some_and(|n| n == "pyproject.toml") {
            compile = compile.arg("--all-extras");
        }
        compile = compile
            .arg(manifest_path.to_string_lossy())
            .arg("-o")
            .arg(all_dep.to_string_lossy())
            .current_dir(&project_dir);
        ctx.run_checked(&compile).await?;

        let pipgrip = Self::venv_executable(&venv, "pipgrip");
        let output = ctx
            .run_checked(
                &ctx.command(pipgrip.to_string_lossy())
                    .args(["--tree-json-exact", "-r"])
                    .arg(all_dep.to_string_lossy())
                    .current_dir(&project_dir),
            )
            .await?;

        ctx.artifacts.write_artifact(
            &ctx.artifact_path(&format!("python_dets_{}.json", index)),
            &output.stdout,
        )?;

        let raw: serde_json::Value =
            serde_json::from_str(&output.stdout).context("pipgrip did not print valid JSON")?;
        let data = PipgripNormalizer::normalize(&raw);
        ctx.artifacts.write_artifact(
            &ctx.artifact_path(&format!("python_normalization_{}.json", index)),
            &serde_json::to_string_pretty(&data)?,
        )?;

        let project_path = manifest
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(PythonSourceEntry {
            source_file: manifest.to_string_lossy().into_owned(),
            project_path: if project_path.is_empty() {
                ".".to_string()
            } else {
                project_path
            },
            data,
        })
    }
}

impl Default for PythonHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EcosystemHandler for PythonHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
    }

    async fn run(&self, ctx: &HandlerContext) -> Result<HandlerOutcome> {
        let mut manifests = ctx.files_named(MANIFESTS);
        if manifests.is_empty() {
            ctx.report.write_line(
                "⏭️ No Python dependency files found, skipping Python dependency tree generation.",
            )?;
            return Ok(HandlerOutcome::Skipped);
        }
        manifests.sort_by_key(|p| p.to_string_lossy().into_owned());

        let total = manifests.len();
        let mut results = stream::iter(manifests.into_iter().enumerate())
            .map(|(i, manifest)| Self::process_manifest(ctx, i + 1, manifest))
            .buffered(ctx.concurrency());

        let mut combined = CombinedDocument::default();
        let mut failed = 0;
        while let Some((lines, entry)) = results.next().await {
            ctx.write_report_lines(&lines)?;
            match entry {
                Some(entry) => combined.python_dependencies.push(entry),
                None => failed += 1,
            }
            ctx.progress.report_progress(
                combined.python_dependencies.len() + failed,
                total,
                Some("Python manifests"),
            );
        }
        let processed = combined.python_dependencies.len();

        let json = serde_json::to_string_pretty(&combined)?;
        ctx.artifacts
            .write_artifact(&ctx.artifact_path(COMBINED_FILE), &json)?;
        if processed == 0 {
            ctx.report.write_line(&format!(
                "⚠️ {} is empty, no dependencies captured.",
                COMBINED_FILE
            ))?;
        } else {
            ctx.write_report_lines(&contents_block(COMBINED_FILE, &json))?;
        }

        Ok(HandlerOutcome::Completed { processed, failed })
    }
}
