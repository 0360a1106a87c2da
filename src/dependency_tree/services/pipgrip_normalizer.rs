use serde::Serialize;
use serde_json::Value;

/// One resolved Python package in the normalized dependency document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PythonPackageNode {
    pub package_name: String,
    pub installed_version: String,
    pub required_version: String,
    pub dependencies: Vec<PythonPackageNode>,
}

/// Normalized document written next to the raw pipgrip output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PythonDependencyDocument {
    pub dependencies: Vec<PythonPackageNode>,
}

/// PipgripNormalizer converts `pipgrip --tree-json-exact` output
///
/// pipgrip emits nested objects keyed by `name==version`; this rewrites them
/// into explicit package nodes. Keys without `==` get an empty version and
/// non-object values become leaves.
pub struct PipgripNormalizer;

impl PipgripNormalizer {
    pub fn normalize(raw: &Value) -> PythonDependencyDocument {
        PythonDependencyDocument {
            dependencies: Self::normalize_level(raw),
        }
    }

    fn normalize_level(node: &Value) -> Vec<PythonPackageNode> {
        let Value::Object(entries) = node else {
            return Vec::new();
        };

        entries
            .iter()
            .map(|(key, sub)| {
                let (name, version) = key.split_once("==").unwrap_or((key.as_str(), ""));
                PythonPackageNode {
                    package_name: name.to_string(),
                    installed_version: version.to_string(),
                    required_version: "Any".to_string(),
                    dependencies: Self::normalize_level(sub),
                }
            })
            .collect()
    }
}
