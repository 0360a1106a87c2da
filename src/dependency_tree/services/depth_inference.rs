use super::tokenizer::nested_pattern;
use crate::dependency_tree::domain::TreeDialect;

/// Width of one indentation level in tree-drawing output
const INDENT_UNIT: usize = 2;

/// Computes the nesting depth encoded by a nested line's prefix.
///
/// Branch markers are stripped, the remaining whitespace is counted and
/// divided by the indent unit. Sibling lines draw different markers
/// (`+-` vs `\-`, `|` vs blank) but leave the same amount of whitespace,
/// so they land on the same depth.
pub fn infer_depth(prefix: &str, dialect: TreeDialect) -> usize {
    let markers = dialect.marker_chars();
    let whitespace = prefix
        .chars()
        .filter(|c| !markers.contains(c))
        .filter(|c| c.is_whitespace())
        .count();
    whitespace / INDENT_UNIT
}

/// Depth of a whole line; 0 when the line has no recognizable prefix structure
pub fn depth_of_line(line: &str, dialect: TreeDialect) -> usize {
    nested_pattern(dialect)
        .captures(line.trim_end())
        .and_then(|c| c.get(1))
        .map_or(0, |prefix| infer_depth(prefix.as_str(), dialect))
}
