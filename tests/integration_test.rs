/// Integration tests for the application layer
mod test_utilities;

use async_trait::async_trait;
use sbom_orchestrator::adapters::inbound::mcp::{
    PipelineTools, ReportOpener, Tool, ToolBackend, ToolDefaults,
};
use sbom_orchestrator::application::dto::HandlerOutcome;
use serde_json::json;
use sbom_orchestrator::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use test_utilities::mocks::*;

const MAVEN_TREE: &str = "\
com.acme:shop:jar:1.0.0
+- org.springframework:spring-core:jar:6.0.13:compile
|  \\- org.springframework:spring-jcl:jar:6.0.13:compile
\\- junit:junit:jar:4.13.2:test
";

const GRADLE_OUTPUT: &str = "\
> Task :app:dependencies

runtimeClasspath - Runtime classpath of source set 'main'.
+--- com.google.guava:guava:32.1.3-jre
\\--- org.slf4j:slf4j-api:2.0.9
";

const PNPM_TREE: &str = "\
web@0.1.0 /repo/web
├─ react@18.2.0
│  └─ loose-envify@1.4.0
└─ zod@3.22.4
";

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn tool_ports(runner: &MockCommandRunner, progress: &MockProgressReporter) -> ToolPorts {
    ToolPorts {
        runner: Arc::new(runner.clone()),
        reader: Arc::new(FileSystemReader::new()),
        artifacts: Arc::new(FileSystemArtifactWriter::new()),
        progress: Arc::new(progress.clone()),
    }
}

fn only(ecosystems: &[Ecosystem]) -> AnalysisSettings {
    AnalysisSettings::default().with_ecosystems(ecosystems)
}

async fn generate_trees(
    repo: &Path,
    out: &Path,
    runner: &MockCommandRunner,
    settings: AnalysisSettings,
) -> (DependencyTreeResponse, MockReportWriter, MockProgressReporter) {
    let progress = MockProgressReporter::new();
    let report = MockReportWriter::new();
    let use_case =
        GenerateDependencyTreesUseCase::new(tool_ports(runner, &progress), Arc::new(report.clone()));

    let response = use_case
        .execute(DependencyTreeRequest::new(
            repo.to_path_buf(),
            out.to_path_buf(),
            settings,
        ))
        .await
        .unwrap();
    (response, report, progress)
}

fn read_json(path: PathBuf) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_go_module_graph_is_saved_as_tree() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "go.mod", "module example.com/app\n");

    let runner = MockCommandRunner::new().respond(
        "go",
        &["mod", "graph"],
        ok("example.com/app github.com/pkg/errors@v0.9.1\n\
            example.com/app golang.org/x/text@v0.14.0\n\
            golang.org/x/text@v0.14.0 golang.org/x/tools@v0.1.0\n"),
    );

    let (response, report, _) =
        generate_trees(repo.path(), out.path(), &runner, only(&[Ecosystem::Go])).await;

    assert_eq!(response.ecosystems.len(), 1);
    assert_eq!(
        response.ecosystems[0].outcome,
        HandlerOutcome::Completed {
            processed: 1,
            failed: 0
        }
    );

    let json = read_json(out.path().join("go_deps_1.json"));
    let root = &json["configurations"][0];
    assert_eq!(root["name"], "example.com/app");
    assert_eq!(root["dependencies"][1]["name"], "golang.org/x/text");
    assert_eq!(root["dependencies"][1]["version"], "v0.14.0");
    assert_eq!(
        root["dependencies"][1]["dependencies"][0]["name"],
        "golang.org/x/tools"
    );

    let text = report.text();
    assert!(text.contains("-----Section 5: Dependency Tree-----"));
    assert!(text.contains("-----Section 5.1: Go Modules-----"));
    assert!(text.contains("--- Contents of go_deps_1.json ---"));
}

#[tokio::test]
async fn test_maven_modules_are_converted_in_order() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "pom.xml", "<project/>");
    write_file(repo.path(), "core/pom.xml", "<project/>");

    let runner = MockCommandRunner::new()
        .respond("mvn", &["-v"], ok("Apache Maven 3.9.6"))
        .respond_with("mvn", &["dependency:tree"], ok(""), |invocation| {
            let target = invocation
                .arguments()
                .iter()
                .find_map(|a| a.strip_prefix("-DoutputFile="))
                .unwrap();
            fs::write(target, MAVEN_TREE).unwrap();
        });

    let mut settings = only(&[Ecosystem::Maven]);
    settings.module_concurrency = 2;
    let (response, report, _) = generate_trees(repo.path(), out.path(), &runner, settings).await;

    assert_eq!(
        response.ecosystems[0].outcome,
        HandlerOutcome::Completed {
            processed: 2,
            failed: 0
        }
    );
    for n in 1..=2 {
        assert!(out.path().join(format!("dependency_tree_{}.txt", n)).exists());
        let json = read_json(out.path().join(format!("maven_dependency_tree_{}.json", n)));
        let root = &json["configurations"][0];
        assert_eq!(root["group"], "com.acme");
        assert_eq!(root["dependencies"][0]["name"], "spring-core");
        assert_eq!(root["dependencies"][0]["dependencies"][0]["name"], "spring-jcl");
        assert_eq!(root["dependencies"][1]["scope"], "test");
    }

    let text = report.text();
    let first = text.find("Processing Maven module #1").unwrap();
    let second = text.find("Processing Maven module #2").unwrap();
    assert!(first < second);
    assert!(text.contains("🔍 Found 2 pom.xml file(s)."));
}

#[tokio::test]
async fn test_missing_maven_fails_only_its_ecosystem() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "pom.xml", "<project/>");
    write_file(repo.path(), "svc/go.mod", "module example.com/svc\n");

    let runner = MockCommandRunner::new().respond(
        "go",
        &["mod", "graph"],
        ok("example.com/svc github.com/google/uuid@v1.4.0\n"),
    );

    let (response, report, progress) = generate_trees(
        repo.path(),
        out.path(),
        &runner,
        only(&[Ecosystem::Go, Ecosystem::Maven]),
    )
    .await;

    assert_eq!(response.failure_count(), 1);
    let maven = &response.ecosystems[1];
    assert_eq!(maven.ecosystem, Ecosystem::Maven);
    assert!(maven.is_failure());
    assert!(maven.error.as_deref().unwrap().contains("Required tool not found"));
    assert_eq!(
        response.ecosystems[0].outcome,
        HandlerOutcome::Completed {
            processed: 1,
            failed: 0
        }
    );

    assert!(report
        .text()
        .contains("❌ Maven Projects dependency tree generation failed:"));
    assert_eq!(progress.errors().len(), 1);
}

#[tokio::test]
async fn test_gradle_batches_are_combined() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "gradlew", "#!/bin/sh\n");
    write_file(repo.path(), "settings.gradle", "rootProject.name = 'shop'\ninclude ':app', ':lib'\n");
    write_file(repo.path(), "app/build.gradle", "");
    write_file(repo.path(), "lib/build.gradle", "");

    let runner = MockCommandRunner::new()
        .respond("gradlew", &[":app:dependencies"], ok(GRADLE_OUTPUT))
        .respond("gradlew", &[":lib:dependencies"], failed("Could not resolve all files"));

    let mut settings = only(&[Ecosystem::Gradle]);
    settings.gradle_batch_size = 1;
    let (response, report, _) = generate_trees(repo.path(), out.path(), &runner, settings).await;

    assert_eq!(
        response.ecosystems[0].outcome,
        HandlerOutcome::Completed {
            processed: 1,
            failed: 1
        }
    );

    let command = fs::read_to_string(out.path().join("gradle_dependencies_command.txt")).unwrap();
    assert_eq!(command.trim_end(), "./gradlew :app:dependencies :lib:dependencies");

    let raw = fs::read_to_string(out.path().join("gradle_dependencies.txt")).unwrap();
    assert!(raw.starts_with("Full Gradle Dependency Output"));
    assert!(raw.contains("========== Batch 1 =========="));
    assert!(raw.contains("========== Batch 2 =========="));
    assert!(raw.contains("Could not resolve all files"));

    let json = read_json(out.path().join("gradle_dependency_tree.json"));
    let config = &json["configurations"][0];
    assert_eq!(config["name"], "runtimeClasspath");
    assert_eq!(config["dependencies"][0]["name"], "guava");

    let text = report.text();
    assert!(text.contains("❌ Gradle batch 2 exited with status 1"));
    assert!(text.contains("✅ All batches complete."));
}

#[tokio::test]
async fn test_gradle_projects_stay_distinct_across_batches() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "gradlew", "#!/bin/sh\n");
    write_file(repo.path(), "settings.gradle", "include ':app', ':lib'\n");
    write_file(repo.path(), "app/build.gradle", "");
    write_file(repo.path(), "lib/build.gradle", "");

    let app = "Project ':app'\nruntimeClasspath\n\\--- com.google.guava:guava:32.1.3-jre\n";
    let lib = "Project ':lib'\nruntimeClasspath\n\\--- org.slf4j:slf4j-api:2.0.9\n";
    let runner = MockCommandRunner::new()
        .respond("gradlew", &[":app:dependencies"], ok(app))
        .respond("gradlew", &[":lib:dependencies"], ok(lib));

    let mut settings = only(&[Ecosystem::Gradle]);
    settings.gradle_batch_size = 1;
    generate_trees(repo.path(), out.path(), &runner, settings).await;

    let json = read_json(out.path().join("gradle_dependency_tree.json"));
    let configurations = json["configurations"].as_array().unwrap();
    assert_eq!(configurations.len(), 2);
    assert_eq!(configurations[0]["group"], ":app");
    assert_eq!(configurations[0]["name"], "runtimeClasspath");
    assert_eq!(configurations[0]["dependencies"][0]["name"], "guava");
    assert_eq!(configurations[1]["group"], ":lib");
    assert_eq!(configurations[1]["dependencies"][0]["name"], "slf4j-api");
}

#[tokio::test]
async fn test_node_numbering_skips_failed_projects() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "package.json", "{}");
    write_file(repo.path(), "web/package.json", "{}");
    write_file(repo.path(), "web/node_modules/react/package.json", "{}");

    let runner = MockCommandRunner::new()
        .respond_in(repo.path(), "pnpm", &["install"], failed("ERR_PNPM_NO_LOCKFILE"))
        .respond("pnpm", &["install"], ok(""))
        .respond("pnpm", &["list"], ok(PNPM_TREE));

    let (response, report, _) =
        generate_trees(repo.path(), out.path(), &runner, only(&[Ecosystem::Node])).await;

    assert_eq!(
        response.ecosystems[0].outcome,
        HandlerOutcome::Completed {
            processed: 1,
            failed: 1
        }
    );
    assert!(out.path().join("node_dependency_tree_1.txt").exists());
    assert!(!out.path().join("node_dependency_tree_2.txt").exists());

    let json = read_json(out.path().join("node_dependency_tree_1.json"));
    let root = &json["configurations"][0];
    assert_eq!(root["name"], "web");
    assert_eq!(root["dependencies"][0]["name"], "react");
    assert_eq!(root["dependencies"][0]["dependencies"][0]["name"], "loose-envify");
    assert!(root.get("group").is_none());

    let installs = runner
        .command_lines()
        .iter()
        .filter(|line| line.ends_with("install"))
        .count();
    assert_eq!(installs, 2);
    assert!(report.text().contains("⏭️ Skipping dependency tree due to install failure."));
}

#[tokio::test]
async fn test_python_manifests_are_combined() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "requirements.txt", "requests==2.31.0\n");

    let runner = MockCommandRunner::new()
        .respond("uv", &["venv"], ok(""))
        .respond("uv", &["pip", "install", "pipgrip"], ok(""))
        .respond("uv", &["pip", "compile"], ok(""))
        .respond(
            "pipgrip",
            &["--tree-json-exact"],
            ok(r#"{"requests==2.31.0": {"idna==3.6": {}}}"#),
        );

    let (response, report, _) =
        generate_trees(repo.path(), out.path(), &runner, only(&[Ecosystem::Python])).await;

    assert_eq!(
        response.ecosystems[0].outcome,
        HandlerOutcome::Completed {
            processed: 1,
            failed: 0
        }
    );

    let combined = read_json(out.path().join("python_dependencies_combined.json"));
    let entry = &combined["python_dependencies"][0];
    assert_eq!(entry["source_file"], "requirements.txt");
    assert_eq!(entry["project_path"], ".");
    let package = &entry["data"]["dependencies"][0];
    assert_eq!(package["package_name"], "requests");
    assert_eq!(package["installed_version"], "2.31.0");
    assert_eq!(package["dependencies"][0]["package_name"], "idna");

    assert!(out.path().join("python_dets_1.json").exists());
    assert!(report
        .text()
        .contains("--- Contents of python_dependencies_combined.json ---"));
    assert!(!runner
        .command_lines()
        .iter()
        .any(|line| line.contains("--all-extras")));
}

#[tokio::test]
async fn test_empty_repository_skips_every_ecosystem() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "README.md", "# nothing to build");

    let runner = MockCommandRunner::new();
    let (response, report, _) =
        generate_trees(repo.path(), out.path(), &runner, AnalysisSettings::default()).await;

    assert_eq!(response.ecosystems.len(), 5);
    assert!(response
        .ecosystems
        .iter()
        .all(|summary| summary.outcome == HandlerOutcome::Skipped));
    assert!(runner.calls().is_empty());

    let text = report.text();
    let sections: Vec<_> = ["5.1", "5.2", "5.3", "5.4", "5.5"]
        .iter()
        .map(|n| text.find(&format!("Section {}:", n)).unwrap())
        .collect();
    assert!(sections.windows(2).all(|w| w[0] < w[1]));
}

struct UnusedCloner;

#[async_trait]
impl RepositoryCloner for UnusedCloner {
    async fn clone_repository(&self, spec: &RepositorySpec, _target_root: &Path) -> Result<PathBuf> {
        panic!("local repositories are never cloned: {}", spec);
    }
}

struct UnusedSbomTool;

#[async_trait]
impl SbomTool for UnusedSbomTool {
    async fn generate(&self, repo_path: &Path) -> Result<PathBuf> {
        panic!("SBOM generation is skipped: {}", repo_path.display());
    }
}

fn analyze_use_case(
    runner: &MockCommandRunner,
    progress: &MockProgressReporter,
    report: &MockReportWriter,
) -> AnalyzeRepositoryUseCase {
    AnalyzeRepositoryUseCase::new(
        tool_ports(runner, progress),
        Arc::new(UnusedCloner),
        Arc::new(UnusedSbomTool),
        Arc::new(FileSystemReader::new()),
        Arc::new(report.clone()),
    )
}

#[tokio::test]
async fn test_analyze_local_repository_with_existing_sbom() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "package.json", "{\"name\": \"web\"}");
    write_file(repo.path(), "pnpm-lock.yaml", "lockfileVersion: '6.0'\n");
    write_file(
        repo.path(),
        "src/server.js",
        "const express = require('express');\nconst app = express();\n",
    );
    write_file(repo.path(), "src/routes.js", "module.exports = [];\n");
    write_file(repo.path(), "src/db.js", "module.exports = {};\n");
    write_file(
        repo.path(),
        "sbom.json",
        r#"{"bomFormat": "CycloneDX", "components": [
            {"type": "framework", "name": "express"},
            {"type": "library", "name": "zod"}
        ]}"#,
    );

    let runner = MockCommandRunner::new()
        .respond("pnpm", &["install"], ok(""))
        .respond("pnpm", &["list"], ok(PNPM_TREE));
    let progress = MockProgressReporter::new();
    let report = MockReportWriter::new();

    let mut settings = AnalysisSettings::default();
    settings.skip_sbom = true;
    let request = AnalyzeRequest::new(
        RepositorySource::Local(repo.path().to_path_buf()),
        out.path().to_path_buf(),
        out.path().join("report.txt"),
        out.path().join("repos"),
        settings,
    );

    let response = analyze_use_case(&runner, &progress, &report)
        .execute(request)
        .await
        .unwrap();

    assert!(response.is_complete(), "{:?}", response.failed_steps);
    assert_eq!(response.analysis.detected_language(), "JavaScript");

    let components = fs::read_to_string(out.path().join("output.txt")).unwrap();
    assert!(components.contains("=== FRAMEWORK ===\nexpress\n"));
    assert!(components.contains("zod"));

    let frameworks = fs::read_to_string(out.path().join("frame.txt")).unwrap();
    assert!(frameworks.contains("=== express ==="));
    assert!(frameworks.contains("server.js"));
    assert!(out.path().join("repo_analysis.json").exists());
    assert!(out.path().join("node_dependency_tree_1.json").exists());

    let text = report.text();
    let order: Vec<_> = [
        "SBOM Orchestrator Report",
        "Section 1: Repository",
        "Section 2: Repository Analysis",
        "Section 3: SBOM Components",
        "Section 4: Framework Usage",
        "Section 5: Dependency Tree",
        "Section 5.5: Node.js Projects",
    ]
    .iter()
    .map(|needle| text.find(needle).unwrap())
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(progress
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Completed: ")));
}

#[tokio::test]
async fn test_analyze_records_missing_sbom_and_continues() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "main.py", "print('hi')\n");

    let runner = MockCommandRunner::new();
    let progress = MockProgressReporter::new();
    let report = MockReportWriter::new();

    let mut settings = AnalysisSettings::default().with_ecosystems(&[Ecosystem::Go]);
    settings.skip_sbom = true;
    let request = AnalyzeRequest::new(
        RepositorySource::Local(repo.path().to_path_buf()),
        out.path().to_path_buf(),
        out.path().join("report.txt"),
        out.path().join("repos"),
        settings,
    );

    let response = analyze_use_case(&runner, &progress, &report)
        .execute(request)
        .await
        .unwrap();

    assert!(!response.is_complete());
    assert_eq!(response.failed_steps, vec!["components".to_string()]);
    assert_eq!(response.ecosystems.len(), 1);

    let frameworks = fs::read_to_string(out.path().join("frame.txt")).unwrap();
    assert_eq!(frameworks, "❌ No frameworks found.\n");
    assert!(report.text().contains("SBOM not found"));
}

#[tokio::test]
async fn test_analyze_missing_local_directory_is_an_error() {
    let out = TempDir::new().unwrap();
    let runner = MockCommandRunner::new();
    let progress = MockProgressReporter::new();
    let report = MockReportWriter::new();

    let request = AnalyzeRequest::new(
        RepositorySource::Local(PathBuf::from("/definitely/not/a/checkout")),
        out.path().to_path_buf(),
        out.path().join("report.txt"),
        out.path().join("repos"),
        AnalysisSettings::default(),
    );

    let err = analyze_use_case(&runner, &progress, &report)
        .execute(request)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid project path"));
}

#[test]
fn test_parse_use_case_with_stdout_presenter() {
    let use_case = ParseDependencyTreeUseCase::new(FileSystemReader::new(), StdoutPresenter::new());
    let response = use_case
        .execute(ParseTreeRequest::from_text(MAVEN_TREE.to_string()))
        .unwrap();

    assert_eq!(response.hierarchy.dialect(), TreeDialect::Maven);
    assert_eq!(response.hierarchy.total_dependency_count(), 3);
    assert!(response.json.contains("\"spring-jcl\""));
}

struct CheckoutCloner;

#[async_trait]
impl RepositoryCloner for CheckoutCloner {
    async fn clone_repository(&self, spec: &RepositorySpec, base_dir: &Path) -> Result<PathBuf> {
        Ok(base_dir.join(spec.name()))
    }
}

fn pipeline_tools(
    runner: &MockCommandRunner,
    report: &MockReportWriter,
    out: &Path,
) -> PipelineTools {
    let report = report.clone();
    let opener: ReportOpener = Arc::new(move |_: &Path| -> Result<Arc<dyn ReportWriter>> {
        Ok(Arc::new(report.clone()))
    });
    PipelineTools::new(
        tool_ports(runner, &MockProgressReporter::new()),
        Arc::new(CheckoutCloner),
        Arc::new(UnusedSbomTool),
        Arc::new(FileSystemReader::new()),
        opener,
        ToolDefaults {
            output_dir: out.to_path_buf(),
            report_path: out.join("report.txt"),
            clone_dir: out.join("repos"),
            settings: AnalysisSettings::default(),
        },
    )
}

fn express_repository(root: &Path) {
    write_file(root, "package.json", "{\"name\": \"web\"}");
    write_file(
        root,
        "src/server.js",
        "const express = require('express');\nconst app = express();\n",
    );
    write_file(
        root,
        "sbom.json",
        r#"{"bomFormat": "CycloneDX", "components": [
            {"type": "framework", "name": "express"},
            {"type": "library", "name": "zod"}
        ]}"#,
    );
}

#[tokio::test]
async fn test_clone_tool_uses_default_clone_dir() {
    let out = TempDir::new().unwrap();
    let tools = pipeline_tools(&MockCommandRunner::new(), &MockReportWriter::new(), out.path());

    let text = tools
        .call(
            Tool::CloneRepo,
            json!({"repo_with_branch": "https://github.com/acme/shop.git@develop"}),
        )
        .await
        .unwrap();
    assert_eq!(
        text,
        format!(
            "✅ Repository cloned successfully at {}",
            out.path().join("repos").join("shop").display()
        )
    );
}

#[tokio::test]
async fn test_component_tool_reuses_existing_sbom() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    express_repository(repo.path());
    let report = MockReportWriter::new();
    let tools = pipeline_tools(&MockCommandRunner::new(), &report, out.path());

    let text = tools
        .call(
            Tool::ExtractSbomComponents,
            json!({"repo_path": repo.path(), "skip_sbom": true}),
        )
        .await
        .unwrap();

    assert!(text.contains("=== FRAMEWORK ===\nexpress"), "{}", text);
    assert!(text.ends_with(&format!("{}", out.path().join("output.txt").display())));
    assert!(out.path().join("output.txt").exists());
    assert!(report.text().contains("Section 3: SBOM Components"));
}

#[tokio::test]
async fn test_framework_tool_reads_frameworks_from_repository_sbom() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    express_repository(repo.path());
    let report = MockReportWriter::new();
    let tools = pipeline_tools(&MockCommandRunner::new(), &report, out.path());

    let text = tools
        .call(Tool::SearchFrameworks, json!({"repo_path": repo.path()}))
        .await
        .unwrap();

    assert!(text.starts_with("🔍 1 framework import(s) found for 1 framework(s)"), "{}", text);
    let frameworks = fs::read_to_string(out.path().join("frame.txt")).unwrap();
    assert!(frameworks.contains("=== express ==="));
    assert!(report.text().contains("Section 4: Framework Usage"));
    assert!(!report.text().contains("Section 3"));
}

#[tokio::test]
async fn test_framework_tool_without_sbom_fails() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(repo.path(), "main.go", "package main\n");
    let tools = pipeline_tools(&MockCommandRunner::new(), &MockReportWriter::new(), out.path());

    let err = tools
        .call(Tool::SearchFrameworks, json!({"repo_path": repo.path()}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("SBOM not found"));
}

#[tokio::test]
async fn test_tree_tool_runs_only_requested_ecosystems() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let artifacts = out.path().join("trees");
    write_file(repo.path(), "package.json", "{\"name\": \"web\"}");
    write_file(repo.path(), "pnpm-lock.yaml", "lockfileVersion: '6.0'\n");
    write_file(repo.path(), "pom.xml", "<project/>");

    let runner = MockCommandRunner::new()
        .respond("pnpm", &["install"], ok(""))
        .respond("pnpm", &["list"], ok(PNPM_TREE));
    let report = MockReportWriter::new();
    let tools = pipeline_tools(&runner, &report, out.path());

    let text = tools
        .call(
            Tool::GenerateDependencyTree,
            json!({"repo_path": repo.path(), "output_dir": &artifacts, "ecosystems": ["node"]}),
        )
        .await
        .unwrap();

    assert!(text.contains("✅ node: 1 processed, 0 failed"), "{}", text);
    assert!(!text.contains("maven"), "{}", text);
    assert!(artifacts.join("node_dependency_tree_1.json").exists());
    assert!(runner.command_lines().iter().all(|line| !line.starts_with("mvn")));
}

#[tokio::test]
async fn test_tool_arguments_are_validated() {
    let out = TempDir::new().unwrap();
    let tools = pipeline_tools(&MockCommandRunner::new(), &MockReportWriter::new(), out.path());

    let err = tools
        .call(Tool::GenerateDependencyTree, json!({"output_dir": "x"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid arguments for generate_dependency_tree"));
}
