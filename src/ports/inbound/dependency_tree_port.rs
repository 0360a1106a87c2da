use crate::application::dto::{ParseTreeRequest, ParseTreeResponse};
use crate::shared::Result;
use std::path::Path;

/// DependencyTreePort - Inbound port for turning tree dumps into JSON
///
/// This is the entry point for callers that already hold a dependency-tree
/// text (a saved `mvn dependency:tree` file, a Gradle report, `pnpm list`
/// output) and only need the structured hierarchy.
pub trait DependencyTreePort {
    /// Parses one dependency-tree dump
    ///
    /// # Arguments
    /// * `request` - Text source and optional dialect
    ///
    /// # Returns
    /// The parsed hierarchy and its pretty-printed JSON document
    ///
    /// # Errors
    /// Returns an error if:
    /// - The input file is a symlink, not a regular file or too large
    /// - The input file cannot be read as UTF-8 text
    fn parse_tree(&self, request: ParseTreeRequest) -> Result<ParseTreeResponse>;

    /// Validates that an input file can be read
    ///
    /// # Errors
    /// Returns an error if the path does not exist or is not a file
    fn validate_input_path(&self, path: &Path) -> Result<()>;
}
