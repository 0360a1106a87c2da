use crate::dependency_tree::TreeDialect;
use std::path::PathBuf;

/// Where the dependency-tree text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    File(PathBuf),
    /// Text already read by the caller, e.g. from stdin
    Text(String),
}

/// ParseTreeRequest - Request DTO for parsing one dependency-tree dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTreeRequest {
    pub source: TreeSource,
    /// Dialect to parse with; detected from the text when `None`
    pub dialect: Option<TreeDialect>,
}

impl ParseTreeRequest {
    pub fn new(source: TreeSource, dialect: Option<TreeDialect>) -> Self {
        Self { source, dialect }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(TreeSource::File(path.into()), None)
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(TreeSource::Text(text.into()), None)
    }

    pub fn with_dialect(mut self, dialect: TreeDialect) -> Self {
        self.dialect = Some(dialect);
        self
    }
}
