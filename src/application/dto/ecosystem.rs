use serde::Serialize;

/// Build ecosystem whose dependency tree can be generated
///
/// Variants are declared in report order: the dependency-tree phase runs the
/// handlers and writes their report subsections in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Go,
    Maven,
    Gradle,
    Python,
    Node,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 5] = [
        Ecosystem::Go,
        Ecosystem::Maven,
        Ecosystem::Gradle,
        Ecosystem::Python,
        Ecosystem::Node,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Go => "go",
            Ecosystem::Maven => "maven",
            Ecosystem::Gradle => "gradle",
            Ecosystem::Python => "python",
            Ecosystem::Node => "node",
        }
    }

    /// Report subsection number under "Section 5: Dependency Tree"
    pub fn section_number(&self) -> &'static str {
        match self {
            Ecosystem::Go => "5.1",
            Ecosystem::Maven => "5.2",
            Ecosystem::Gradle => "5.3",
            Ecosystem::Python => "5.4",
            Ecosystem::Node => "5.5",
        }
    }

    pub fn section_title(&self) -> &'static str {
        match self {
            Ecosystem::Go => "Go Modules",
            Ecosystem::Maven => "Maven Projects",
            Ecosystem::Gradle => "Gradle Projects",
            Ecosystem::Python => "Python Projects",
            Ecosystem::Node => "Node.js Projects",
        }
    }
}

impl std::str::FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "go" | "golang" => Ok(Ecosystem::Go),
            "maven" | "mvn" => Ok(Ecosystem::Maven),
            "gradle" => Ok(Ecosystem::Gradle),
            "python" | "py" => Ok(Ecosystem::Python),
            "node" | "nodejs" | "node.js" => Ok(Ecosystem::Node),
            _ => Err(format!(
                "Invalid ecosystem: {}. Please specify one of 'go', 'maven', 'gradle', 'python' or 'node'",
                s
            )),
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
