//! sbom-orchestrator - Repository SBOM and dependency-tree consolidation
//!
//! This library clones a repository (or takes a local checkout), classifies it,
//! pulls the components out of a CycloneDX SBOM, searches for framework imports
//! and runs each ecosystem's build tool to capture dependency trees. Everything
//! lands in one plain-text report plus JSON artifacts.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_tree`, `repository_analysis`): Pure parsing and classification logic
//! - **Application Layer** (`application`): Use cases, ecosystem handlers and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports, plus the MCP tool server
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_orchestrator::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = ParseDependencyTreeUseCase::new(FileSystemReader::new(), StdoutPresenter::new());
//!
//! let request = ParseTreeRequest::from_file(PathBuf::from("dependency_tree.txt"))
//!     .with_dialect(TreeDialect::Maven);
//! let response = use_case.execute(request)?;
//! eprintln!("{} configuration(s)", response.hierarchy.len());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_tree;
pub mod ports;
pub mod repository_analysis;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemArtifactWriter, FileSystemReader, FileSystemWriter, ReportFile, StdoutPresenter,
    };
    pub use crate::adapters::outbound::git::GitCloner;
    pub use crate::adapters::outbound::process::SystemCommandRunner;
    pub use crate::adapters::outbound::sbom::CdxgenSbomTool;
    pub use crate::application::dto::{
        AnalysisResponse, AnalysisSettings, AnalyzeRequest, DependencyTreeRequest,
        DependencyTreeResponse, Ecosystem, ParseTreeRequest, ParseTreeResponse, RepositorySource,
    };
    pub use crate::application::use_cases::{
        AnalyzeRepositoryUseCase, DetectRepositoryUseCase, GenerateDependencyTreesUseCase,
        ParseDependencyTreeUseCase, ToolPorts,
    };
    pub use crate::dependency_tree::{
        parse, parse_with_dialect, DependencyHierarchy, DependencyRecord, HierarchySerializer,
        TreeDialect,
    };
    pub use crate::ports::inbound::DependencyTreePort;
    pub use crate::ports::outbound::{
        ArtifactWriter, CommandInvocation, CommandOutput, CommandRunner, OutputPresenter,
        ProgressReporter, ReportWriter, RepositoryCloner, RepositoryReader, SbomTool,
    };
    pub use crate::repository_analysis::domain::{RepositoryAnalysis, RepositorySpec};
    pub use crate::shared::Result;
}
