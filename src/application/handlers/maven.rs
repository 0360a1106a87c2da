use super::{contents_block, platform_program, EcosystemHandler, HandlerContext};
use crate::application::dto::{Ecosystem, HandlerOutcome};
use crate::dependency_tree::{parse_with_dialect, HierarchySerializer, TreeDialect};
use crate::shared::Result;
use anyhow::bail;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};

/// MavenHandler runs `mvn dependency:tree` for every `pom.xml`
pub struct MavenHandler;

impl MavenHandler {
    pub fn new() -> Self {
        Self
    }

    fn program() -> String {
        platform_program("mvn", "mvn.cmd")
    }

    /// Verifies that Maven can run before any module is processed
    async fn check_maven(ctx: &HandlerContext) -> Result<()> {
        let invocation = ctx.command(Self::program()).arg("-v");
        let output = ctx.runner.run(&invocation).await?;
        if !output.success() {
            bail!(
                "Maven is installed but failed to run `{}` (exit status {}): {}",
                invocation,
                output.status_label(),
                output.stderr.trim()
            );
        }
        Ok(())
    }

    async fn process_module(ctx: &HandlerContext, index: usize, pom: PathBuf) -> (Vec<String>, bool) {
        let module_dir = ctx.module_dir(&pom);
        let mut lines = vec![format!(
            "\n📦 Processing Maven module #{}: {}",
            index,
            module_dir.display()
        )];

        let tree_txt = ctx.artifact_path(&format!("dependency_tree_{}.txt", index));
        let invocation = ctx
            .command(Self::program())
            .arg("dependency:tree")
            .arg(format!("-DoutputFile={}", tree_txt.display()))
            .arg("-DoutputType=text")
            .current_dir(&module_dir);

        match ctx.runner.run(&invocation).await {
            Ok(output) if output.success() => {}
            Ok(output) => {
                lines.push(format!("❌ Maven failed for {}", module_dir.display()));
                lines.extend(output.stderr.lines().map(str::to_string));
                return (lines, false);
            }
            Err(e) => {
                lines.push(format!("❌ Maven failed for {}: {}", module_dir.display(), e));
                return (lines, false);
            }
        }
        lines.push(format!("✅ Maven dependency tree saved → {}", tree_txt.display()));

        match Self::convert(ctx, index, &tree_txt) {
            Ok((json_path, json)) => {
                lines.push(format!("✅ Dependencies JSON saved to {}", json_path.display()));
                let file_name = format!("maven_dependency_tree_{}.json", index);
                lines.extend(contents_block(&file_name, &json));
                (lines, true)
            }
            Err(e) => {
                tracing::warn!(module = %module_dir.display(), error = %e, "maven tree conversion failed");
                lines.push(format!(
                    "❌ Failed to parse Maven output for {}: {}",
                    module_dir.display(),
                    e
                ));
                (lines, false)
            }
        }
    }

    fn convert(ctx: &HandlerContext, index: usize, tree_txt: &Path) -> Result<(PathBuf, String)> {
        let text = ctx.reader.read_text(tree_txt)?;
        let hierarchy = parse_with_dialect(&text, TreeDialect::Maven);
        let json = HierarchySerializer::to_json_pretty(&hierarchy)?;

        let json_path = ctx.artifact_path(&format!("maven_dependency_tree_{}.json", index));
        ctx.artifacts.write_artifact(&json_path, &json)?;
        Ok((json_path, json))
    }
}

impl Default for MavenHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EcosystemHandler for MavenHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    async fn run(&self, ctx: &HandlerContext) -> Result<HandlerOutcome> {
        let poms = ctx.files_named(&["pom.xml"]);
        if poms.is_empty() {
            ctx.report
                .write_line("⏭️ No Maven projects found, skipping dependency tree generation.")?;
            return Ok(HandlerOutcome::Skipped);
        }

        Self::check_maven(ctx).await?;
        ctx.report
            .write_line(&format!("✅ Using system Maven: {}", Self::program()))?;

        let total = poms.len();
        ctx.report
            .write_line(&format!("🔍 Found {} pom.xml file(s).", total))?;

        let mut modules = stream::iter(poms.into_iter().enumerate())
            .map(|(i, pom)| Self::process_module(ctx, i + 1, pom))
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
                .report_progress(processed + failed, total, Some("Maven modules"));
        }

        Ok(HandlerOutcome::Completed { processed, failed })
    }
}
