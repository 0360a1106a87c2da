/// Use cases module containing application business logic orchestration
mod analyze_repository;
mod detect_repository;
mod generate_dependency_trees;
mod parse_dependency_tree;

pub use analyze_repository::{
    AnalyzeRepositoryUseCase, ANALYSIS_FILE, COMPONENTS_FILE, FRAMEWORKS_FILE,
};
pub use detect_repository::DetectRepositoryUseCase;
pub use generate_dependency_trees::{GenerateDependencyTreesUseCase, ToolPorts};

pub(crate) use generate_dependency_trees::{absolute, ensure_directory};
pub use parse_dependency_tree::ParseDependencyTreeUseCase;
