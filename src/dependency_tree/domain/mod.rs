pub mod dependency_record;
pub mod dialect;
pub mod hierarchy;

pub use dependency_record::{Configuration, DependencyRecord};
pub use dialect::{NotationStyle, TreeDialect, TREE_DRAWING_CHARS};
pub use hierarchy::DependencyHierarchy;
