/// Component types listed when none are configured
pub const DEFAULT_COMPONENT_TYPES: &[&str] = &["framework", "library", "application"];

/// Section whose names are searched for in source code
pub const FRAMEWORK_TYPE: &str = "framework";

/// ComponentCatalog groups SBOM component names by component type
///
/// Sections keep the configured type order; names keep SBOM order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentCatalog {
    sections: Vec<(String, Vec<String>)>,
}

impl ComponentCatalog {
    pub fn new(sections: Vec<(String, Vec<String>)>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[(String, Vec<String>)] {
        &self.sections
    }

    /// Names listed under a type (case-insensitive)
    pub fn names_of(&self, component_type: &str) -> &[String] {
        self.sections
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(component_type))
            .map_or(&[], |(_, names)| names.as_slice())
    }

    pub fn frameworks(&self) -> &[String] {
        self.names_of(FRAMEWORK_TYPE)
    }

    /// `=== TYPE ===` blocks, one name per line, blank line after each block
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (component_type, names) in &self.sections {
            out.push_str(&format!("=== {} ===\n", component_type.to_uppercase()));
            if names.is_empty() {
                out.push_str("No components found.\n");
            }
            for name in names {
                out.push_str(name);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}
