use std::fmt;
use std::path::PathBuf;

/// One source line that imports or requires a framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkMatch {
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    pub content: String,
}

impl fmt::Display for FrameworkMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.content)
    }
}

/// Matches found for one search term.
///
/// The term is the framework name, or its prefix before the first `-` when
/// only the prefix search produced results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkUsage {
    pub term: String,
    pub matches: Vec<FrameworkMatch>,
}

/// Renders search results the way `frame.txt` stores them
pub fn render_framework_usages(usages: &[FrameworkUsage]) -> String {
    if usages.is_empty() {
        return "❌ No frameworks found.\n".to_string();
    }

    let mut out = String::new();
    for usage in usages {
        out.push_str(&format!("\n=== {} ===\n", usage.term));
        for m in &usage.matches {
            out.push_str(&m.to_string());
            out.push('\n');
        }
    }
    out
}
