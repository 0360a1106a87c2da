mod cli;
mod config;

use cli::{AnalyzeArgs, Args, Command, ParseArgs, ServeArgs, TreeArgs};
use config::{discover_config, load_config_from_path, ConfigFile, ResolvedSettings};
use sbom_orchestrator::adapters::inbound::mcp::{McpServer, PipelineTools, ReportOpener, ToolDefaults};
use sbom_orchestrator::adapters::outbound::console::StderrProgressReporter;
use sbom_orchestrator::adapters::outbound::filesystem::{
    FileSystemArtifactWriter, FileSystemReader, ReportFile, StdoutPresenter,
};
use sbom_orchestrator::adapters::outbound::git::GitCloner;
use sbom_orchestrator::adapters::outbound::process::SystemCommandRunner;
use sbom_orchestrator::adapters::outbound::sbom::CdxgenSbomTool;
use sbom_orchestrator::application::dto::{
    AnalyzeRequest, DependencyTreeRequest, ParseTreeRequest, RepositorySource,
};
use sbom_orchestrator::application::factories::{PresenterFactory, PresenterType};
use sbom_orchestrator::application::use_cases::{
    AnalyzeRepositoryUseCase, DetectRepositoryUseCase, GenerateDependencyTreesUseCase,
    ParseDependencyTreeUseCase, ToolPorts,
};
use sbom_orchestrator::ports::outbound::{OutputPresenter, ProgressReporter, ReportWriter};
use sbom_orchestrator::shared::error::{ExitCode, OrchestratorError};
use sbom_orchestrator::shared::security::MAX_SCAN_FILE_SIZE;
use sbom_orchestrator::shared::Result;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Once};
use tokio::io::BufReader;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_LEVEL_ENV: &str = "SBOM_ORCHESTRATOR_LOG_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "warn";

static INIT: Once = Once::new();

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_logging(args.log_directive());

    let exit_code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            exit_code_for(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

/// Stderr subscriber; `RUST_LOG` wins over the flags and the environment default
fn init_logging(directive: Option<String>) {
    INIT.call_once(|| {
        let level = directive
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let mut filter = EnvFilter::from_default_env();
        if std::env::var("RUST_LOG").is_err() {
            if let Ok(directive) = format!("sbom_orchestrator={}", level).parse() {
                filter = filter.add_directive(directive);
            }
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<OrchestratorError>() {
        Some(OrchestratorError::InvalidRepositorySpec { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let quiet = args.quiet;

    match args.command {
        Command::Parse(parse) => run_parse(parse),
        Command::Detect { path } => run_detect(&path),
        Command::Tree(tree) => run_tree(tree, config, quiet).await,
        Command::Analyze(analyze) => run_analyze(analyze, config, quiet).await,
        Command::Serve(serve) => run_serve(serve, config, quiet).await,
    }
}

fn run_parse(args: ParseArgs) -> Result<ExitCode> {
    let request = if args.input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| OrchestratorError::FileReadError {
                path: PathBuf::from("<stdin>"),
                details: e.to_string(),
            })?;
        ParseTreeRequest::from_text(text)
    } else {
        ParseTreeRequest::from_file(PathBuf::from(&args.input))
    };
    let request = match args.dialect {
        Some(dialect) => request.with_dialect(dialect),
        None => request,
    };

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    let use_case = ParseDependencyTreeUseCase::new(FileSystemReader::new(), presenter);
    use_case.execute(request)?;
    Ok(ExitCode::Success)
}

fn run_detect(path: &Path) -> Result<ExitCode> {
    validate_repository_path(path)?;
    let analysis = DetectRepositoryUseCase::new(FileSystemReader::new()).execute(path)?;
    StdoutPresenter::new().present(&analysis.to_json_pretty()?)?;
    Ok(ExitCode::Success)
}

async fn run_tree(args: TreeArgs, config: Option<ConfigFile>, quiet: bool) -> Result<ExitCode> {
    validate_repository_path(&args.path)?;
    let settings = ResolvedSettings::resolve(args.overrides(), config);

    let ports = tool_ports(&settings, quiet);
    let report = open_report(&settings.report_path)?;
    let use_case = GenerateDependencyTreesUseCase::new(ports.clone(), report);

    let response = use_case
        .execute(DependencyTreeRequest::new(
            args.path,
            settings.output_dir,
            settings.analysis,
        ))
        .await?;

    if response.failure_count() > 0 {
        ports.progress.report_error(&format!(
            "⚠️  {} ecosystem(s) failed, see {}",
            response.failure_count(),
            settings.report_path.display()
        ));
        return Ok(ExitCode::PartialFailure);
    }
    ports.progress.report_completion(&format!(
        "Dependency trees written to {}",
        settings.report_path.display()
    ));
    Ok(ExitCode::Success)
}

async fn run_analyze(
    args: AnalyzeArgs,
    config: Option<ConfigFile>,
    quiet: bool,
) -> Result<ExitCode> {
    let source = RepositorySource::resolve(&args.repo)?;
    let settings = ResolvedSettings::resolve(args.overrides(), config);

    let ports = tool_ports(&settings, quiet);
    let cloner = Arc::new(GitCloner::new(
        Arc::clone(&ports.runner),
        Arc::clone(&ports.progress),
    ));
    let sbom_tool = Arc::new(CdxgenSbomTool::new(
        Arc::clone(&ports.runner),
        Arc::clone(&ports.progress),
    ));
    let scan_reader = Arc::new(FileSystemReader::with_max_file_size(MAX_SCAN_FILE_SIZE));
    let report = open_report(&settings.report_path)?;

    let use_case = AnalyzeRepositoryUseCase::new(ports, cloner, sbom_tool, scan_reader, report);
    let request = AnalyzeRequest::new(
        source,
        settings.output_dir,
        settings.report_path,
        settings.clone_dir,
        settings.analysis,
    );

    let response = use_case.execute(request).await?;
    if response.is_complete() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::PartialFailure)
    }
}

/// Stdout carries protocol messages only; progress and logs stay on stderr
async fn run_serve(args: ServeArgs, config: Option<ConfigFile>, quiet: bool) -> Result<ExitCode> {
    let settings = ResolvedSettings::resolve(args.overrides(), config);

    let ports = tool_ports(&settings, quiet);
    let cloner = Arc::new(GitCloner::new(
        Arc::clone(&ports.runner),
        Arc::clone(&ports.progress),
    ));
    let sbom_tool = Arc::new(CdxgenSbomTool::new(
        Arc::clone(&ports.runner),
        Arc::clone(&ports.progress),
    ));
    let scan_reader = Arc::new(FileSystemReader::with_max_file_size(MAX_SCAN_FILE_SIZE));
    let opener: ReportOpener = Arc::new(open_report);
    let defaults = ToolDefaults {
        output_dir: settings.output_dir,
        report_path: settings.report_path,
        clone_dir: settings.clone_dir,
        settings: settings.analysis,
    };

    let tools = PipelineTools::new(ports, cloner, sbom_tool, scan_reader, opener, defaults);
    tracing::info!("mcp server listening on stdio");
    McpServer::new(tools)
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(ExitCode::Success)
}

fn tool_ports(settings: &ResolvedSettings, quiet: bool) -> ToolPorts {
    let progress: Arc<dyn ProgressReporter> = if quiet {
        Arc::new(StderrProgressReporter::quiet())
    } else {
        Arc::new(StderrProgressReporter::new())
    };

    ToolPorts {
        runner: Arc::new(SystemCommandRunner::new(settings.analysis.command_timeout)),
        reader: Arc::new(FileSystemReader::new()),
        artifacts: Arc::new(FileSystemArtifactWriter::new()),
        progress,
    }
}

fn open_report(path: &Path) -> Result<Arc<dyn ReportWriter>> {
    Ok(Arc::new(ReportFile::open(path)?))
}

fn validate_repository_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(OrchestratorError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for repository paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| OrchestratorError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(OrchestratorError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Repository path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(OrchestratorError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_repository_path_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_repository_path(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_validate_repository_path_nonexistent() {
        let err = validate_repository_path(Path::new("/nonexistent/path/that/does/not/exist"))
            .unwrap_err();
        assert!(format!("{}", err).contains("Directory does not exist"));
    }

    #[test]
    fn test_validate_repository_path_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("pom.xml");
        fs::write(&file_path, "<project/>").unwrap();

        let err = validate_repository_path(&file_path).unwrap_err();
        assert!(format!("{}", err).contains("Not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_repository_path_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("repo");
        fs::create_dir(&target).unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = validate_repository_path(&link).unwrap_err();
        assert!(format!("{}", err).contains("symbolic link"));
    }

    #[test]
    fn test_exit_code_for_invalid_repository_spec() {
        let err: anyhow::Error = OrchestratorError::InvalidRepositorySpec {
            input: "ftp://nowhere".to_string(),
            reason: "Unsupported scheme".to_string(),
        }
        .into();
        assert_eq!(exit_code_for(&err), ExitCode::InvalidArguments);

        let err = anyhow::anyhow!("boom");
        assert_eq!(exit_code_for(&err), ExitCode::ApplicationError);
    }
}
