use crate::dependency_tree::domain::DependencyRecord;
use std::collections::{HashMap, HashSet};

/// Nesting limit when expanding a module graph into a tree
pub const MAX_GRAPH_DEPTH: usize = 100;

/// GoModuleGraph holds the edges printed by `go mod graph`
///
/// Each line is `parent child`, where the main module appears without a
/// version and every other module as `path@version`. The graph may contain
/// cycles and shared subtrees, so expansion into a tree visits each module
/// once: its first occurrence carries the children, later ones are leaves.
#[derive(Debug, Default)]
pub struct GoModuleGraph {
    root: Option<String>,
    order: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

impl GoModuleGraph {
    pub fn parse(text: &str) -> Self {
        let mut graph = Self::default();

        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let (Some(parent), Some(child), None) = (fields.next(), fields.next(), fields.next())
            else {
                if !line.trim().is_empty() {
                    tracing::trace!(line, "skipping malformed module graph line");
                }
                continue;
            };

            if graph.root.is_none() && !parent.contains('@') {
                graph.root = Some(parent.to_string());
            }
            if !graph.edges.contains_key(parent) {
                graph.order.push(parent.to_string());
            }
            graph
                .edges
                .entry(parent.to_string())
                .or_default()
                .push(child.to_string());
        }

        graph
    }

    /// The main module; falls back to the first parent when none is unversioned
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref().or_else(|| self.order.first().map(String::as_str))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Expands the graph into a tree rooted at the main module
    pub fn to_tree(&self) -> Option<DependencyRecord> {
        let root = self.root()?;
        let mut visited = HashSet::new();
        Some(self.expand(root, 0, &mut visited))
    }

    fn expand(&self, module: &str, depth: usize, visited: &mut HashSet<String>) -> DependencyRecord {
        let mut record = module_record(module);
        if !visited.insert(module.to_string()) || depth >= MAX_GRAPH_DEPTH {
            return record;
        }

        if let Some(children) = self.edges.get(module) {
            for child in children {
                record.push_dependency(self.expand(child, depth + 1, visited));
            }
        }
        record
    }
}

fn module_record(module: &str) -> DependencyRecord {
    match module.rsplit_once('@') {
        Some((path, version)) if !path.is_empty() => {
            DependencyRecord::package(path, Some(version.to_string()))
        }
        _ => DependencyRecord::named(module),
    }
}
