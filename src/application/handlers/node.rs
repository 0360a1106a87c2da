use super::{contents_block, platform_program, EcosystemHandler, HandlerContext};
use crate::application::dto::{Ecosystem, HandlerOutcome};
use crate::dependency_tree::{parse_with_dialect, HierarchySerializer, TreeDialect};
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// NodeHandler lists pnpm dependency trees for every `package.json`
///
/// Artifacts are numbered by successful project only, so a project whose
/// install fails leaves no gap in `node_dependency_tree_{n}` names.
pub struct NodeHandler;

impl NodeHandler {
    pub fn new() -> Self {
        Self
    }

    fn program() -> String {
        platform_program("pnpm", "pnpm.cmd")
    }

    /// Directories holding a `package.json`, outside `node_modules`, in walk order
    pub fn project_dirs(ctx: &HandlerContext) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        ctx.files_named(&["package.json"])
            .into_iter()
            .filter(|p| !p.components().any(|c| c.as_os_str() == "node_modules"))
            .map(|p| p.parent().map(Path::to_path_buf).unwrap_or_default())
            .filter(|dir| seen.insert(dir.clone()))
            .collect()
    }

    /// Runs install and list; the tree text on success
    async fn list_project(ctx: &HandlerContext, dir: PathBuf) -> (Vec<String>, Option<String>) {
        let project_dir = ctx.repo_path.join(&dir);
        let label = if dir.as_os_str().is_empty() {
            ".".to_string()
        } else {
            dir.display().to_string()
        };
        let mut lines = vec![format!("\n📦 Processing Node project: {}", label)];

        let install = ctx
            .command(Self::program())
            .arg("install")
            .current_dir(&project_dir);
        if let Err(e) = ctx.run_checked(&install).await {
            lines.push(format!("❌ pnpm install failed for {}: {}", label, e));
            lines.push("⏭️ Skipping dependency tree due to install failure.".to_string());
            return (lines, None);
        }

        let list = ctx
            .command(Self::program())
            .args(["list", "--depth", "Infinity"])
            .current_dir(&project_dir);
        match ctx.run_checked(&list).await {
            Ok(output) => (lines, Some(output.stdout)),
            Err(e) => {
                lines.push(format!("❌ Dependency tree generation failed for {}: {}", label, e));
                (lines, None)
            }
        }
    }

    fn save_tree(ctx: &HandlerContext, index: usize, text: &str) -> Result<Vec<String>> {
        let txt_name = format!("node_dependency_tree_{}.txt", index);
        ctx.artifacts
            .write_artifact(&ctx.artifact_path(&txt_name), text)?;

        let hierarchy = parse_with_dialect(text, TreeDialect::Pnpm);
        let json = HierarchySerializer::to_json_pretty(&hierarchy)?;
        let json_name = format!("node_dependency_tree_{}.json", index);
        ctx.artifacts
            .write_artifact(&ctx.artifact_path(&json_name), &json)?;

        Ok(contents_block(&json_name, &json))
    }
}

impl Default for NodeHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EcosystemHandler for NodeHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Node
    }

    async fn run(&self, ctx: &HandlerContext) -> Result<HandlerOutcome> {
        let dirs = Self::project_dirs(ctx);
        if dirs.is_empty() {
            ctx.report.write_line(
                "⏭️ No Node.js projects found, skipping dependency tree generation.",
            )?;
            return Ok(HandlerOutcome::Skipped);
        }

        let total = dirs.len();
        ctx.report
            .write_line(&format!("✅ Found {} Node.js project(s).", total))?;

        let mut projects = stream::iter(dirs)
            .map(|dir| Self::list_project(ctx, dir))
            .buffered(ctx.concurrency());

        let (mut processed, mut failed) = (0, 0);
        while let Some((lines, tree)) = projects.next().await {
            ctx.write_report_lines(&lines)?;
            match tree {
                Some(text) => match Self::save_tree(ctx, processed + 1, &text) {
                    Ok(block) => {
                        ctx.write_report_lines(&block)?;
                        processed += 1;
                    }
                    Err(e) => {
                        ctx.report
                            .write_line(&format!("⚠️ Failed to convert dependency tree to JSON: {}", e))?;
                        failed += 1;
                    }
                },
                None => failed += 1,
            }
            ctx.progress
                .report_progress(processed + failed, total, Some("Node.js projects"));
        }

        Ok(HandlerOutcome::Completed { processed, failed })
    }
}
