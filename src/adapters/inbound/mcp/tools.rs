use super::protocol::ToolDefinition;
use crate::application::dto::Ecosystem;
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::path::PathBuf;

/// Pipeline steps published by the MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    CloneRepo,
    AnalyzeRepo,
    GenerateSbom,
    ExtractSbomComponents,
    SearchFrameworks,
    GenerateDependencyTree,
}

impl Tool {
    /// Every tool, in `tools/list` order
    pub const ALL: [Tool; 6] = [
        Tool::CloneRepo,
        Tool::AnalyzeRepo,
        Tool::GenerateSbom,
        Tool::ExtractSbomComponents,
        Tool::SearchFrameworks,
        Tool::GenerateDependencyTree,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::CloneRepo => "clone_repo",
            Tool::AnalyzeRepo => "analyze_repo",
            Tool::GenerateSbom => "generate_sbom",
            Tool::ExtractSbomComponents => "extract_sbom_components",
            Tool::SearchFrameworks => "search_frameworks",
            Tool::GenerateDependencyTree => "generate_dependency_tree",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::CloneRepo => "Clone a git repository (url[@branch]) and check out its branch",
            Tool::AnalyzeRepo => {
                "Detect the primary language and dependency manager and save repo_analysis.json"
            }
            Tool::GenerateSbom => "Generate a CycloneDX sbom.json for a repository with cdxgen",
            Tool::ExtractSbomComponents => {
                "Group the SBOM components by type and save them to output.txt"
            }
            Tool::SearchFrameworks => {
                "Search source files for imports of the SBOM's frameworks and save frame.txt"
            }
            Tool::GenerateDependencyTree => {
                "Run each ecosystem's build tool and save the dependency trees as JSON"
            }
        }
    }

    pub fn input_schema(&self) -> Value {
        let repo_path = json!({
            "type": "string",
            "description": "Local repository directory"
        });
        let output_dir = json!({
            "type": "string",
            "description": "Directory for generated artifacts"
        });
        let report_file = json!({
            "type": "string",
            "description": "Report file the step appends its section to"
        });

        match self {
            Tool::CloneRepo => json!({
                "type": "object",
                "properties": {
                    "repo_with_branch": {
                        "type": "string",
                        "description": "Git URL, optionally suffixed with @branch"
                    },
                    "clone_dir": {
                        "type": "string",
                        "description": "Parent directory for the checkout"
                    }
                },
                "required": ["repo_with_branch"]
            }),
            Tool::GenerateSbom => json!({
                "type": "object",
                "properties": { "repo_path": repo_path },
                "required": ["repo_path"]
            }),
            Tool::AnalyzeRepo | Tool::SearchFrameworks => json!({
                "type": "object",
                "properties": {
                    "repo_path": repo_path,
                    "output_dir": output_dir,
                    "report_file": report_file
                },
                "required": ["repo_path"]
            }),
            Tool::ExtractSbomComponents => json!({
                "type": "object",
                "properties": {
                    "repo_path": repo_path,
                    "output_dir": output_dir,
                    "report_file": report_file,
                    "skip_sbom": {
                        "type": "boolean",
                        "description": "Reuse an sbom.json already in the repository"
                    }
                },
                "required": ["repo_path"]
            }),
            Tool::GenerateDependencyTree => json!({
                "type": "object",
                "properties": {
                    "repo_path": repo_path,
                    "output_dir": output_dir,
                    "report_file": report_file,
                    "ecosystems": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": Ecosystem::ALL.iter().map(|e| e.as_str()).collect::<Vec<_>>()
                        },
                        "description": "Only generate trees for these ecosystems"
                    }
                },
                "required": ["repo_path"]
            }),
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }

    /// Decodes the `arguments` of a `tools/call` for this tool
    pub fn arguments<T: DeserializeOwned>(&self, arguments: Value) -> Result<T> {
        serde_json::from_value(arguments).map_err(|e| {
            anyhow::Error::from(OrchestratorError::Validation {
                message: format!("Invalid arguments for {}: {}", self.name(), e),
            })
        })
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Deserialize)]
pub struct CloneArgs {
    pub repo_with_branch: String,
    pub clone_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct RepoArgs {
    pub repo_path: PathBuf,
}

/// Arguments of the steps that write artifacts and a report section
#[derive(Debug, Deserialize)]
pub struct StepArgs {
    pub repo_path: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ComponentArgs {
    #[serde(flatten)]
    pub step: StepArgs,
    #[serde(default)]
    pub skip_sbom: bool,
}

#[derive(Debug, Deserialize)]
pub struct TreeArgs {
    #[serde(flatten)]
    pub step: StepArgs,
    #[serde(default)]
    pub ecosystems: Vec<String>,
}

impl TreeArgs {
    pub fn parsed_ecosystems(&self) -> Result<Vec<Ecosystem>> {
        self.ecosystems
            .iter()
            .map(|name| {
                name.parse::<Ecosystem>()
                    .map_err(|message| anyhow::Error::from(OrchestratorError::Validation { message }))
            })
            .collect()
    }
}
