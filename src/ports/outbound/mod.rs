/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, processes, console, etc.).
pub mod artifact_writer;
pub mod command_runner;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_writer;
pub mod repository_cloner;
pub mod repository_reader;
pub mod sbom_tool;

pub use artifact_writer::ArtifactWriter;
pub use command_runner::{CommandInvocation, CommandOutput, CommandRunner};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_writer::{ReportWriter, SECTION_SEPARATOR};
pub use repository_cloner::RepositoryCloner;
pub use repository_reader::RepositoryReader;
pub use sbom_tool::{SbomTool, SBOM_FILE_NAME};
