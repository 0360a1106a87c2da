use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use sbom_orchestrator::application::dto::Ecosystem;
use sbom_orchestrator::dependency_tree::TreeDialect;

use crate::config::CliOverrides;

/// Clone repositories, generate SBOMs and consolidate dependency trees
#[derive(Parser, Debug)]
#[command(name = "sbom-orchestrator")]
#[command(version)]
#[command(about = "Clone repositories, generate SBOMs and consolidate dependency trees into one report", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to ./sbom-orchestrator.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Diagnostic log level: error, warn, info, debug or trace
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Shortcut for --log-level debug
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Hide progress output and log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the whole pipeline: clone, detect, SBOM, components, frameworks, dependency trees
    Analyze(AnalyzeArgs),

    /// Generate dependency trees for a local checkout
    Tree(TreeArgs),

    /// Print the detected language and dependency manager as JSON
    Detect {
        /// Repository directory
        path: PathBuf,
    },

    /// Parse a dependency-tree dump (mvn dependency:tree, gradle dependencies, pnpm list)
    Parse(ParseArgs),

    /// Serve the pipeline steps as MCP tools over stdin/stdout
    Serve(ServeArgs),
}

/// Options shared by the commands that write artifacts
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory for generated artifacts [default: output]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report file [default: <output-dir>/report.txt]
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Only generate trees for this ecosystem (repeatable)
    #[arg(short, long = "ecosystem", value_name = "NAME")]
    pub ecosystems: Vec<Ecosystem>,
}

#[derive(ClapArgs, Debug)]
pub struct AnalyzeArgs {
    /// Git URL (optionally suffixed with @branch) or an existing local directory
    pub repo: String,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Do not run cdxgen; reuse an sbom.json already in the repository
    #[arg(long)]
    pub skip_sbom: bool,

    /// Skip the framework import search
    #[arg(long)]
    pub skip_frameworks: bool,
}

#[derive(ClapArgs, Debug)]
pub struct TreeArgs {
    /// Repository directory
    pub path: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
pub struct ServeArgs {
    /// Defaults for tool calls that leave out output_dir or report_file
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
pub struct ParseArgs {
    /// Dependency-tree text file, or - for stdin
    pub input: String,

    /// Tree dialect: maven, gradle or pnpm (detected when omitted)
    #[arg(short, long)]
    pub dialect: Option<TreeDialect>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log filter directive from the flags, if any were given
    pub fn log_directive(&self) -> Option<String> {
        if self.quiet {
            Some("error".to_string())
        } else if self.verbose {
            Some("debug".to_string())
        } else {
            self.log_level.clone()
        }
    }
}

impl AnalyzeArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output_dir: self.output.output_dir.clone(),
            report: self.output.report.clone(),
            skip_sbom: self.skip_sbom,
            skip_frameworks: self.skip_frameworks,
            ecosystems: self.output.ecosystems.clone(),
        }
    }
}

impl TreeArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output_dir: self.output.output_dir.clone(),
            report: self.output.report.clone(),
            ecosystems: self.output.ecosystems.clone(),
            ..CliOverrides::default()
        }
    }
}

impl ServeArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output_dir: self.output.output_dir.clone(),
            report: self.output.report.clone(),
            ecosystems: self.output.ecosystems.clone(),
            ..CliOverrides::default()
        }
    }
}
