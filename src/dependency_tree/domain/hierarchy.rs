use super::{Configuration, TreeDialect};

/// DependencyHierarchy aggregate: every configuration parsed from one text blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyHierarchy {
    dialect: TreeDialect,
    configurations: Vec<Configuration>,
}

impl DependencyHierarchy {
    pub fn new(dialect: TreeDialect, configurations: Vec<Configuration>) -> Self {
        Self {
            dialect,
            configurations,
        }
    }

    pub fn empty(dialect: TreeDialect) -> Self {
        Self::new(dialect, Vec::new())
    }

    pub fn dialect(&self) -> TreeDialect {
        self.dialect
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn into_configurations(self) -> Vec<Configuration> {
        self.configurations
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Number of nested dependency records across all configurations (roots excluded)
    pub fn total_dependency_count(&self) -> usize {
        self.configurations
            .iter()
            .map(|config| config.descendant_count())
            .sum()
    }

    /// Deepest nesting level found below any configuration root
    pub fn max_depth(&self) -> usize {
        self.configurations
            .iter()
            .map(|config| config.depth())
            .max()
            .unwrap_or(0)
    }
}
