use crate::application::dto::{ParseTreeRequest, ParseTreeResponse, TreeSource};
use crate::dependency_tree::{parse_with_dialect, HierarchySerializer, TreeDialect};
use crate::ports::inbound::DependencyTreePort;
use crate::ports::outbound::{OutputPresenter, RepositoryReader};
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use std::path::Path;

/// ParseDependencyTreeUseCase - Parses a saved tree dump and presents its JSON
///
/// # Type Parameters
/// * `R` - RepositoryReader implementation used for the input file
/// * `P` - OutputPresenter implementation receiving the JSON
pub struct ParseDependencyTreeUseCase<R, P> {
    reader: R,
    presenter: P,
}

impl<R, P> ParseDependencyTreeUseCase<R, P>
where
    R: RepositoryReader,
    P: OutputPresenter,
{
    pub fn new(reader: R, presenter: P) -> Self {
        Self { reader, presenter }
    }

    /// Parses the request's text and hands the JSON to the presenter
    pub fn execute(&self, request: ParseTreeRequest) -> Result<ParseTreeResponse> {
        let response = self.parse_tree(request)?;
        self.presenter.present(&response.json)?;
        Ok(response)
    }
}

impl<R, P> DependencyTreePort for ParseDependencyTreeUseCase<R, P>
where
    R: RepositoryReader,
    P: OutputPresenter,
{
    fn parse_tree(&self, request: ParseTreeRequest) -> Result<ParseTreeResponse> {
        let text = match request.source {
            TreeSource::File(path) => {
                self.validate_input_path(&path)?;
                self.reader.read_text(&path)?
            }
            TreeSource::Text(text) => text,
        };

        let dialect = request
            .dialect
            .unwrap_or_else(|| TreeDialect::detect(&text));
        let hierarchy = parse_with_dialect(&text, dialect);
        tracing::info!(
            dialect = %dialect,
            configurations = hierarchy.len(),
            dependencies = hierarchy.total_dependency_count(),
            "dependency tree parsed"
        );

        let json = HierarchySerializer::to_json_pretty(&hierarchy)?;
        Ok(ParseTreeResponse::new(hierarchy, json))
    }

    fn validate_input_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(OrchestratorError::FileReadError {
                path: path.to_path_buf(),
                details: "File does not exist".to_string(),
            }
            .into());
        }
        if path.is_dir() {
            return Err(OrchestratorError::FileReadError {
                path: path.to_path_buf(),
                details: "Path is a directory, expected a dependency-tree text file".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
