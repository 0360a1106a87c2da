/// DependencyRecord represents one parsed dependency and its subtree
///
/// Children keep the order in which they appeared in the source text.
/// The children list can only grow inside this crate (during hierarchy
/// construction); once a hierarchy is handed out the records are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyRecord {
    group: Option<String>,
    name: String,
    kind: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    dependencies: Vec<DependencyRecord>,
}

/// A top-level root record (one Maven module, one Gradle configuration, one package)
pub type Configuration = DependencyRecord;

impl DependencyRecord {
    /// Creates a record carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a Maven/Gradle style coordinate record
    pub fn coordinate(
        group: Option<String>,
        name: impl Into<String>,
        kind: Option<String>,
        version: Option<String>,
        scope: Option<String>,
    ) -> Self {
        Self {
            group,
            name: name.into(),
            kind,
            version,
            scope,
            dependencies: Vec::new(),
        }
    }

    /// Creates a Node/Go style `name@version` record
    pub fn package(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
            ..Self::default()
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Packaging type (`jar`, `pom`, ...), serialized as `type`
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn dependencies(&self) -> &[DependencyRecord] {
        &self.dependencies
    }

    /// Number of records below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.dependencies
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Length of the longest path from this record to a leaf (a leaf has depth 0)
    pub fn depth(&self) -> usize {
        self.dependencies
            .iter()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Colon or at notation reconstructed from the parsed fields
    pub fn notation(&self) -> String {
        match (&self.group, &self.version) {
            (Some(group), _) => {
                let mut parts = vec![group.as_str(), self.name.as_str()];
                parts.extend(self.kind.as_deref());
                parts.extend(self.version.as_deref());
                parts.extend(self.scope.as_deref());
                parts.join(":")
            }
            (None, Some(version)) => format!("{}@{}", self.name, version),
            (None, None) => self.name.clone(),
        }
    }

    pub(crate) fn push_dependency(&mut self, child: DependencyRecord) {
        self.dependencies.push(child);
    }
}

impl std::fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}
