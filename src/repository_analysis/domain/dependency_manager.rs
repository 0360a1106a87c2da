use serde::{Serialize, Serializer};
use std::fmt;

/// Build or package manager detected for the primary language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyManager {
    Poetry,
    Uv,
    Pipenv,
    Pip,
    Setuptools,
    Flit,
    Pyproject,
    Maven,
    Gradle,
    Node,
    GoModules,
    Cargo,
    Composer,
    Unknown,
}

impl DependencyManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyManager::Poetry => "poetry",
            DependencyManager::Uv => "uv",
            DependencyManager::Pipenv => "pipenv",
            DependencyManager::Pip => "pip",
            DependencyManager::Setuptools => "setuptools",
            DependencyManager::Flit => "flit",
            DependencyManager::Pyproject => "pyproject",
            DependencyManager::Maven => "maven",
            DependencyManager::Gradle => "gradle",
            DependencyManager::Node => "npm / yarn / pnpm",
            DependencyManager::GoModules => "go modules",
            DependencyManager::Cargo => "cargo",
            DependencyManager::Composer => "composer",
            DependencyManager::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DependencyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DependencyManager {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
