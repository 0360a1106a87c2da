use super::coordinate_parser::parse_for_dialect;
use super::depth_inference::infer_depth;
use super::hierarchy_builder::HierarchyBuilder;
use super::tokenizer::{TreeLine, Tokenizer};
use crate::dependency_tree::domain::{DependencyHierarchy, DependencyRecord, TreeDialect};

/// TreeParser turns the text report of a dependency-tree command into a
/// nested hierarchy.
///
/// Parsing is total: every input, however malformed, yields a (possibly
/// empty) hierarchy. Each call uses a fresh builder so no state leaks
/// between files.
#[derive(Debug, Clone, Copy)]
pub struct TreeParser {
    dialect: TreeDialect,
}

impl TreeParser {
    pub fn new(dialect: TreeDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> TreeDialect {
        self.dialect
    }

    pub fn parse(&self, text: &str) -> DependencyHierarchy {
        let mut tokenizer = Tokenizer::new(text, self.dialect);
        let mut builder = HierarchyBuilder::new();
        let mut project: Option<&str> = None;

        for line in tokenizer.by_ref() {
            match line {
                TreeLine::Project { name } => project = Some(name),
                TreeLine::Root { notation } => {
                    let record = match project {
                        // Configuration names repeat across projects; the group keeps them apart
                        Some(project) => DependencyRecord::coordinate(
                            Some(project.to_string()),
                            notation,
                            None,
                            None,
                            None,
                        ),
                        None => parse_for_dialect(notation, self.dialect),
                    };
                    builder.start_configuration(record);
                }
                TreeLine::Nested { prefix, notation } => {
                    let depth = infer_depth(prefix, self.dialect);
                    builder.attach(depth, parse_for_dialect(notation, self.dialect));
                }
            }
        }

        if tokenizer.skipped() > 0 || builder.dropped_lines() > 0 {
            tracing::debug!(
                dialect = %self.dialect,
                skipped = tokenizer.skipped(),
                dropped = builder.dropped_lines(),
                "ignored lines while parsing dependency tree"
            );
        }

        DependencyHierarchy::new(self.dialect, builder.finish())
    }
}

/// Parses dependency-tree text, guessing the dialect from its markers
pub fn parse(text: &str) -> DependencyHierarchy {
    parse_with_dialect(text, TreeDialect::detect(text))
}

/// Parses dependency-tree text drawn in a known dialect
pub fn parse_with_dialect(text: &str, dialect: TreeDialect) -> DependencyHierarchy {
    TreeParser::new(dialect).parse(text)
}
