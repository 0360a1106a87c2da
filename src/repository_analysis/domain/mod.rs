pub mod component_catalog;
pub mod dependency_manager;
pub mod framework_usage;
pub mod language_report;
pub mod repository_analysis;
pub mod repository_spec;

pub use component_catalog::{ComponentCatalog, DEFAULT_COMPONENT_TYPES, FRAMEWORK_TYPE};
pub use dependency_manager::DependencyManager;
pub use framework_usage::{render_framework_usages, FrameworkMatch, FrameworkUsage};
pub use language_report::{
    LanguageReport, OrderedCounts, LANGUAGE_EXTENSIONS, SPECIAL_FILES, UNKNOWN_LANGUAGE,
};
pub use repository_analysis::RepositoryAnalysis;
pub use repository_spec::RepositorySpec;
