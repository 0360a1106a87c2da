use crate::dependency_tree::domain::{DependencyHierarchy, DependencyRecord, NotationStyle};
use crate::shared::Result;
use serde::Serialize;
use serde_json::Value;

/// HierarchySerializer renders a parsed hierarchy as the
/// `{"configurations": [...]}` document consumed by report aggregation.
///
/// Colon-style dialects emit every coordinate field (absent ones as `null`);
/// the pnpm dialect emits only `name`, `version` and `dependencies`.
pub struct HierarchySerializer;

impl HierarchySerializer {
    pub fn to_value(hierarchy: &DependencyHierarchy) -> Result<Value> {
        let document = HierarchyDocument::new(
            hierarchy.configurations(),
            hierarchy.dialect().notation_style(),
        );
        Ok(serde_json::to_value(document)?)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_pretty(hierarchy: &DependencyHierarchy) -> Result<String> {
        Self::configurations_to_json_pretty(
            hierarchy.configurations(),
            hierarchy.dialect().notation_style(),
        )
    }

    /// Wraps already-built roots (e.g. a Go module graph) in the same document shape
    pub fn configurations_to_json_pretty(
        configurations: &[DependencyRecord],
        style: NotationStyle,
    ) -> Result<String> {
        let document = HierarchyDocument::new(configurations, style);
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[derive(Debug, Serialize)]
struct HierarchyDocument<'a> {
    configurations: Vec<RecordView<'a>>,
}

impl<'a> HierarchyDocument<'a> {
    fn new(configurations: &'a [DependencyRecord], style: NotationStyle) -> Self {
        Self {
            configurations: configurations
                .iter()
                .map(|record| RecordView::new(record, style))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RecordView<'a> {
    Colon(ColonRecord<'a>),
    At(AtRecord<'a>),
}

impl<'a> RecordView<'a> {
    fn new(record: &'a DependencyRecord, style: NotationStyle) -> Self {
        match style {
            NotationStyle::Colon => RecordView::Colon(ColonRecord::from(record)),
            NotationStyle::At => RecordView::At(AtRecord::from(record)),
        }
    }
}

/// Maven/Gradle record; field order is the document's key order
#[derive(Debug, Serialize)]
struct ColonRecord<'a> {
    group: Option<&'a str>,
    name: &'a str,
    #[serde(rename = "type")]
    kind: Option<&'a str>,
    version: Option<&'a str>,
    scope: Option<&'a str>,
    dependencies: Vec<ColonRecord<'a>>,
}

impl<'a> From<&'a DependencyRecord> for ColonRecord<'a> {
    fn from(record: &'a DependencyRecord) -> Self {
        Self {
            group: record.group(),
            name: record.name(),
            kind: record.kind(),
            version: record.version(),
            scope: record.scope(),
            dependencies: record.dependencies().iter().map(Self::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AtRecord<'a> {
    name: &'a str,
    version: Option<&'a str>,
    dependencies: Vec<AtRecord<'a>>,
}

impl<'a> From<&'a DependencyRecord> for AtRecord<'a> {
    fn from(record: &'a DependencyRecord) -> Self {
        Self {
            name: record.name(),
            version: record.version(),
            dependencies: record.dependencies().iter().map(Self::from).collect(),
        }
    }
}
