use crate::repository_analysis::domain::{FrameworkMatch, FrameworkUsage};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Import/require pattern for a full framework name
pub fn full_name_pattern(name: &str) -> Regex {
    let name = regex::escape(name);
    build(&format!(r#"(import\s+.*{name}.*|require\(['"]{name}['"]\))"#))
}

/// Import/require pattern for a name prefix, anchored at a path segment
pub fn prefix_pattern(prefix: &str) -> Regex {
    let prefix = regex::escape(prefix);
    build(&format!(
        r#"(import\s+.*(^|/){prefix}.*|require\(['"]{prefix}['"]\))"#
    ))
}

fn build(pattern: &str) -> Regex {
    // Escaped input keeps the pattern well-formed
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("framework pattern from escaped input")
}

/// Every line of `content` matching `pattern`
pub fn search_content(pattern: &Regex, path: &Path, content: &str) -> Vec<FrameworkMatch> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(idx, line)| FrameworkMatch {
            path: path.to_path_buf(),
            line: idx + 1,
            content: line.to_string(),
        })
        .collect()
}

/// FrameworkMatcher looks for framework imports across source files
///
/// A framework is first searched by its full name. Only when that finds
/// nothing and the name contains `-` is its prefix before the first `-`
/// searched, at most once per distinct prefix.
pub struct FrameworkMatcher<F> {
    read_file: F,
}

impl<F> FrameworkMatcher<F>
where
    F: Fn(&Path) -> Option<String>,
{
    /// # Arguments
    /// * `read_file` - Returns a file's text, or `None` to skip it (binary, too large)
    pub fn new(read_file: F) -> Self {
        Self { read_file }
    }

    pub fn search(&self, frameworks: &[String], files: &[PathBuf]) -> Vec<FrameworkUsage> {
        let mut usages = Vec::new();
        let mut searched_prefixes = HashSet::new();

        for framework in frameworks {
            let matches = self.search_files(&full_name_pattern(framework), files);
            if !matches.is_empty() {
                tracing::debug!(framework = %framework, count = matches.len(), "framework matched");
                usages.push(FrameworkUsage {
                    term: framework.clone(),
                    matches,
                });
                continue;
            }

            let Some((prefix, _)) = framework.split_once('-') else {
                continue;
            };
            if !searched_prefixes.insert(prefix.to_string()) {
                continue;
            }

            let matches = self.search_files(&prefix_pattern(prefix), files);
            if !matches.is_empty() {
                tracing::debug!(prefix, count = matches.len(), "framework prefix matched");
                usages.push(FrameworkUsage {
                    term: prefix.to_string(),
                    matches,
                });
            }
        }

        usages
    }

    fn search_files(&self, pattern: &Regex, files: &[PathBuf]) -> Vec<FrameworkMatch> {
        files
            .iter()
            .filter_map(|path| (self.read_file)(path).map(|content| (path, content)))
            .flat_map(|(path, content)| search_content(pattern, path, &content))
            .collect()
    }
}
