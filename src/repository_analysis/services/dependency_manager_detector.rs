use crate::repository_analysis::domain::DependencyManager;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// DependencyManagerDetector picks the build tool from manifest and lock files
///
/// Directories are examined in the order they first appear in the file list,
/// and the first directory holding a recognized file decides.
pub struct DependencyManagerDetector;

impl DependencyManagerDetector {
    /// Detects the dependency manager for the repository's primary language
    ///
    /// # Arguments
    /// * `root` - Repository root the relative `files` are resolved against
    /// * `files` - Repository files in walk order
    /// * `language` - Primary language from the language report
    /// * `read_file` - Reads a `pyproject.toml`; `None` when unreadable
    pub fn detect<P, F>(root: &Path, files: &[P], language: &str, read_file: F) -> DependencyManager
    where
        P: AsRef<Path>,
        F: Fn(&Path) -> Option<String>,
    {
        let directories = group_by_directory(files);

        for (dir, names) in &directories {
            let has = |name: &str| names.contains(name);
            let found = match language {
                "Python" => Self::python_manager(&has).or_else(|| {
                    has("pyproject.toml").then(|| {
                        let content = read_file(&root.join(dir).join("pyproject.toml"));
                        Self::from_pyproject(content.as_deref())
                    })
                }),
                "Java" | "Kotlin" | "Groovy" => {
                    if has("pom.xml") {
                        Some(DependencyManager::Maven)
                    } else if has("build.gradle") || has("build.gradle.kts") {
                        Some(DependencyManager::Gradle)
                    } else {
                        None
                    }
                }
                "JavaScript" | "TypeScript" => has("package.json").then_some(DependencyManager::Node),
                "Go" => has("go.mod").then_some(DependencyManager::GoModules),
                "Rust" => has("cargo.toml").then_some(DependencyManager::Cargo),
                "PHP" => has("composer.json").then_some(DependencyManager::Composer),
                _ => return DependencyManager::Unknown,
            };

            if let Some(manager) = found {
                return manager;
            }
        }

        DependencyManager::Unknown
    }

    fn python_manager(has: &dyn Fn(&str) -> bool) -> Option<DependencyManager> {
        [
            ("poetry.lock", DependencyManager::Poetry),
            ("uv.lock", DependencyManager::Uv),
            ("pipfile.lock", DependencyManager::Pipenv),
            ("requirements.txt", DependencyManager::Pip),
            ("pipfile", DependencyManager::Pipenv),
            ("setup.py", DependencyManager::Setuptools),
        ]
        .into_iter()
        .find(|(file, _)| has(file))
        .map(|(_, manager)| manager)
    }

    /// Inspects the `[tool]` table of a pyproject.toml
    pub fn from_pyproject(content: Option<&str>) -> DependencyManager {
        let Some(Ok(document)) = content.map(str::parse::<toml::Table>) else {
            return DependencyManager::Pyproject;
        };
        let Some(tool) = document.get("tool").and_then(|t| t.as_table()) else {
            return DependencyManager::Pyproject;
        };

        if tool.contains_key("poetry") {
            DependencyManager::Poetry
        } else if tool.contains_key("uv") {
            DependencyManager::Uv
        } else if tool.contains_key("flit") {
            DependencyManager::Flit
        } else {
            DependencyManager::Pyproject
        }
    }
}

/// Directory -> lowercase file names, in order of first appearance
fn group_by_directory<P: AsRef<Path>>(files: &[P]) -> Vec<(PathBuf, HashSet<String>)> {
    let mut groups: Vec<(PathBuf, HashSet<String>)> = Vec::new();
    for file in files {
        let file = file.as_ref();
        let Some(name) = file.file_name() else {
            continue;
        };
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = name.to_string_lossy().to_lowercase();
        match groups.iter_mut().find(|(d, _)| *d == dir) {
            Some((_, names)) => {
                names.insert(name);
            }
            None => groups.push((dir, HashSet::from([name]))),
        }
    }
    groups
}
