use super::{contents_block, EcosystemHandler, HandlerContext};
use crate::application::dto::{Ecosystem, HandlerOutcome};
use crate::dependency_tree::domain::NotationStyle;
use crate::dependency_tree::services::GoModuleGraph;
use crate::dependency_tree::HierarchySerializer;
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;

/// GoHandler builds module trees from `go mod graph`
///
/// The graph is expanded natively, so no extra Go tool has to be installed.
pub struct GoHandler;

impl GoHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns the report lines for one module and whether it succeeded
    async fn process_module(ctx: &HandlerContext, index: usize, go_mod: PathBuf) -> (Vec<String>, bool) {
        let module_dir = ctx.module_dir(&go_mod);
        let mut lines = vec![format!(
            "\n🚀 Processing Go module #{}: {}",
            index,
            module_dir.display()
        )];

        match Self::generate(ctx, index, &module_dir).await {
            Ok(Some((file_name, json))) => {
                lines.extend(contents_block(&file_name, &json));
                (lines, true)
            }
            Ok(None) => {
                lines.push("⚠️ Module graph is empty!".to_string());
                (lines, true)
            }
            Err(e) => {
                tracing::warn!(module = %module_dir.display(), error = %e, "go module failed");
                lines.push(format!("❌ Failed for {}", module_dir.display()));
                lines.push(format!("Error: {}", e));
                (lines, false)
            }
        }
    }

    async fn generate(
        ctx: &HandlerContext,
        index: usize,
        module_dir: &std::path::Path,
    ) -> Result<Option<(String, String)>> {
        let invocation = ctx.command("go").args(["mod", "graph"]).current_dir(module_dir);
        let output = ctx.run_checked(&invocation).await?;

        let graph = GoModuleGraph::parse(&output.stdout);
        let Some(tree) = graph.to_tree() else {
            return Ok(None);
        };
        tracing::debug!(edges = graph.edge_count(), "go module graph parsed");

        let json = HierarchySerializer::configurations_to_json_pretty(&[tree], NotationStyle::At)?;
        let file_name = format!("go_deps_{}.json", index);
        ctx.artifacts
            .write_artifact(&ctx.artifact_path(&file_name), &json)?;
        Ok(Some((file_name, json)))
    }
}

impl Default for GoHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EcosystemHandler for GoHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    async fn run(&self, ctx: &HandlerContext) -> Result<HandlerOutcome> {
        let go_mods = ctx.files_named(&["go.mod"]);
        if go_mods.is_empty() {
            ctx.report
                .write_line("⏭️ No Go modules found, skipping Go dependency tree generation.")?;
            return Ok(HandlerOutcome::Skipped);
        }

        let total = go_mods.len();
        ctx.report
            .write_line(&format!("📦 Detected {} Go module(s)", total))?;

        let mut modules = stream::iter(go_mods.into_iter().enumerate())
            .map(|(i, go_mod)| Self::process_module(ctx, i + 1, go_mod))
            .buffered(ctx.concurrency());

        let (mut processed, mut failed) = (0, 0);
        while let Some((lines, ok)) = modules.next().await {
            ctx.write_report_lines(&lines)?;
            if ok {
                processed += 1;
            } else {
                failed += 1;
            }
            ctx.progress
                .report_progress(processed + failed, total, Some("Go modules"));
        }

        Ok(HandlerOutcome::Completed { processed, failed })
    }
}
