use super::Ecosystem;
use crate::dependency_tree::DependencyHierarchy;
use crate::repository_analysis::domain::RepositoryAnalysis;
use serde::Serialize;
use std::path::PathBuf;

/// ParseTreeResponse - Parsed hierarchy plus its JSON rendering
#[derive(Debug, Clone)]
pub struct ParseTreeResponse {
    pub hierarchy: DependencyHierarchy,
    pub json: String,
}

impl ParseTreeResponse {
    pub fn new(hierarchy: DependencyHierarchy, json: String) -> Self {
        Self { hierarchy, json }
    }
}

/// Result of running one ecosystem handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HandlerOutcome {
    /// Nothing of this ecosystem was found in the repository
    Skipped,
    Completed { processed: usize, failed: usize },
}

impl HandlerOutcome {
    pub fn has_failures(&self) -> bool {
        matches!(self, HandlerOutcome::Completed { failed, .. } if *failed > 0)
    }
}

/// Per-ecosystem line of the dependency-tree phase summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EcosystemSummary {
    pub ecosystem: Ecosystem,
    pub outcome: HandlerOutcome,
    /// Set when the handler aborted instead of completing
    pub error: Option<String>,
}

impl EcosystemSummary {
    pub fn new(ecosystem: Ecosystem, outcome: HandlerOutcome) -> Self {
        Self {
            ecosystem,
            outcome,
            error: None,
        }
    }

    pub fn failed(ecosystem: Ecosystem, error: impl Into<String>) -> Self {
        Self {
            ecosystem,
            outcome: HandlerOutcome::Completed {
                processed: 0,
                failed: 1,
            },
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.outcome.has_failures()
    }
}

/// DependencyTreeResponse - Outcome of the dependency-tree phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTreeResponse {
    pub ecosystems: Vec<EcosystemSummary>,
}

impl DependencyTreeResponse {
    pub fn failure_count(&self) -> usize {
        self.ecosystems.iter().filter(|s| s.is_failure()).count()
    }
}

/// AnalysisResponse - Outcome of a full analysis run
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub repo_path: PathBuf,
    pub report_path: PathBuf,
    pub analysis: RepositoryAnalysis,
    pub ecosystems: Vec<EcosystemSummary>,
    /// Pipeline steps that failed without aborting the run
    pub failed_steps: Vec<String>,
}

impl AnalysisResponse {
    /// True when every step and every ecosystem handler succeeded
    pub fn is_complete(&self) -> bool {
        self.failed_steps.is_empty() && !self.ecosystems.iter().any(|s| s.is_failure())
    }
}
