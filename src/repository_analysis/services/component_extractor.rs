use crate::repository_analysis::domain::ComponentCatalog;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SbomDocument {
    #[serde(default)]
    components: Vec<SbomComponent>,
}

#[derive(Debug, Deserialize)]
struct SbomComponent {
    #[serde(default, rename = "type")]
    component_type: String,
    #[serde(default)]
    name: String,
}

/// ComponentExtractor lists CycloneDX component names grouped by type
pub struct ComponentExtractor {
    types: Vec<String>,
}

impl ComponentExtractor {
    pub fn new(types: Vec<String>) -> Self {
        Self { types }
    }

    /// Builds the catalog from the raw text of an `sbom.json`
    ///
    /// # Errors
    /// Returns an error if the document is not valid JSON
    pub fn extract(&self, sbom_json: &str) -> Result<ComponentCatalog> {
        let document: SbomDocument =
            serde_json::from_str(sbom_json).context("Failed to parse SBOM document")?;

        let sections = self
            .types
            .iter()
            .map(|component_type| {
                let names = document
                    .components
                    .iter()
                    .filter(|c| c.component_type.eq_ignore_ascii_case(component_type))
                    .map(|c| c.name.clone())
                    .collect();
                (component_type.clone(), names)
            })
            .collect();

        Ok(ComponentCatalog::new(sections))
    }
}
