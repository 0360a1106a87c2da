use super::Ecosystem;
use crate::repository_analysis::domain::DEFAULT_COMPONENT_TYPES;
use std::time::Duration;

pub const DEFAULT_MODULE_CONCURRENCY: usize = 2;
pub const DEFAULT_GRADLE_BATCH_SIZE: usize = 50;
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 1800;

/// AnalysisSettings - Tunables shared by every phase of an analysis run
///
/// Built by the CLI from flags, the config file and these defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Component types listed in the component catalog, in section order
    pub component_types: Vec<String>,
    /// Ecosystems whose dependency trees are generated, in report order
    pub ecosystems: Vec<Ecosystem>,
    /// Modules of one ecosystem processed at the same time
    pub module_concurrency: usize,
    /// Upper bound for a single external command
    pub command_timeout: Duration,
    /// Gradle projects passed to one `gradlew` invocation
    pub gradle_batch_size: usize,
    pub skip_sbom: bool,
    pub skip_frameworks: bool,
}

impl AnalysisSettings {
    pub fn is_enabled(&self, ecosystem: Ecosystem) -> bool {
        self.ecosystems.contains(&ecosystem)
    }

    /// Restricts the run to the given ecosystems, keeping report order
    pub fn with_ecosystems(mut self, ecosystems: &[Ecosystem]) -> Self {
        if !ecosystems.is_empty() {
            let mut selected = ecosystems.to_vec();
            selected.sort();
            selected.dedup();
            self.ecosystems = selected;
        }
        self
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            component_types: DEFAULT_COMPONENT_TYPES.iter().map(|t| t.to_string()).collect(),
            ecosystems: Ecosystem::ALL.to_vec(),
            module_concurrency: DEFAULT_MODULE_CONCURRENCY,
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            gradle_batch_size: DEFAULT_GRADLE_BATCH_SIZE,
            skip_sbom: false,
            skip_frameworks: false,
        }
    }
}
