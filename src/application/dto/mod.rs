/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into the use cases and results back
/// out, keeping the parsing and analysis domains free of CLI concerns.
mod analysis_settings;
mod analyze_request;
mod ecosystem;
mod parse_tree_request;
mod responses;

pub use analysis_settings::{
    AnalysisSettings, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_GRADLE_BATCH_SIZE,
    DEFAULT_MODULE_CONCURRENCY,
};
pub use analyze_request::{
    AnalyzeRequest, DependencyTreeRequest, RepositorySource, DEFAULT_CLONE_DIR,
    DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_FILE,
};
pub use ecosystem::Ecosystem;
pub use parse_tree_request::{ParseTreeRequest, TreeSource};
pub use responses::{
    AnalysisResponse, DependencyTreeResponse, EcosystemSummary, HandlerOutcome,
    ParseTreeResponse,
};
