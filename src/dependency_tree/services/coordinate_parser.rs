use crate::dependency_tree::domain::{DependencyRecord, NotationStyle, TreeDialect};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Gradle suffixes: `(*)` repeated subtree, `(c)` constraint, `(n)` not resolved
static GRADLE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\((?:\*|c|n|constraint)\)\s*$").expect("valid gradle suffix pattern")
});

/// Parses one notation in the dialect's style, after dialect-specific cleanup.
pub fn parse_for_dialect(notation: &str, dialect: TreeDialect) -> DependencyRecord {
    let normalized = normalize_notation(notation, dialect);
    parse_notation(&normalized, dialect.notation_style())
}

/// Parses a notation string into a record. Never fails: input that fits no
/// known shape becomes a name-only record.
pub fn parse_notation(notation: &str, style: NotationStyle) -> DependencyRecord {
    let trimmed = notation.trim();
    match style {
        NotationStyle::Colon => parse_colon(trimmed),
        NotationStyle::At => parse_at(trimmed),
    }
}

fn parse_colon(notation: &str) -> DependencyRecord {
    let parts: Vec<&str> = notation.split(':').map(str::trim).collect();
    let field = |idx: usize| Some(parts[idx].to_string());

    match parts.len() {
        n if n >= 5 => DependencyRecord::coordinate(field(0), parts[1], field(2), field(3), field(4)),
        4 => DependencyRecord::coordinate(field(0), parts[1], field(2), field(3), None),
        // group:name:version by convention; see DESIGN.md for the ambiguity
        3 => DependencyRecord::coordinate(field(0), parts[1], None, field(2), None),
        // Bare `name@version` keeps its version whatever the dialect
        1 if notation.rfind('@').is_some_and(|idx| idx > 0) => parse_at(notation),
        _ => DependencyRecord::named(notation),
    }
}

fn parse_at(notation: &str) -> DependencyRecord {
    match notation.rfind('@') {
        // A leading '@' belongs to a scope (`@types/node`), not a version
        Some(idx) if idx > 0 => {
            let (name, version) = (&notation[..idx], &notation[idx + 1..]);
            let version = (!version.is_empty()).then(|| version.to_string());
            DependencyRecord::package(name, version)
        }
        _ => DependencyRecord::named(notation),
    }
}

/// Dialect-specific cleanup applied before splitting
pub fn normalize_notation(notation: &str, dialect: TreeDialect) -> Cow<'_, str> {
    let trimmed = notation.trim();
    match dialect {
        TreeDialect::Maven => Cow::Borrowed(trimmed),
        TreeDialect::Gradle => normalize_gradle(trimmed),
        TreeDialect::Pnpm => {
            Cow::Borrowed(trimmed.split_whitespace().next().unwrap_or(trimmed))
        }
    }
}

fn normalize_gradle(notation: &str) -> Cow<'_, str> {
    let mut text = notation;
    while let Some(m) = GRADLE_SUFFIX.find(text) {
        text = &text[..m.start()];
    }

    let Some((requested, selected)) = text.split_once(" -> ") else {
        return Cow::Borrowed(text);
    };

    let selected = selected.trim();
    if selected.contains(':') {
        // Substituted by a different module entirely
        return Cow::Borrowed(selected);
    }

    let parts: Vec<&str> = requested.trim().split(':').collect();
    if parts.len() >= 2 {
        Cow::Owned(format!("{}:{}:{}", parts[0], parts[1], selected))
    } else {
        Cow::Borrowed(requested.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_five_fields() {
        let record = parse_notation("junit:junit:jar:4.13.2:test", NotationStyle::Colon);
        assert_eq!(record.group(), Some("junit"));
        assert_eq!(record.name(), "junit");
        assert_eq!(record.kind(), Some("jar"));
        assert_eq!(record.version(), Some("4.13.2"));
        assert_eq!(record.scope(), Some("test"));
        assert!(record.dependencies().is_empty());
    }

    #[test]
    fn test_four_fields() {
        let record = parse_notation("com.example:app:jar:1.0.0", NotationStyle::Colon);
        assert_eq!(record.group(), Some("com.example"));
        assert_eq!(record.name(), "app");
        assert_eq!(record.kind(), Some("jar"));
        assert_eq!(record.version(), Some("1.0.0"));
        assert_eq!(record.scope(), None);
    }

    #[test]
    fn test_three_fields_is_group_name_version() {
        let record = parse_notation("org.slf4j:slf4j-api:2.0.9", NotationStyle::Colon);
        assert_eq!(record.group(), Some("org.slf4j"));
        assert_eq!(record.name(), "slf4j-api");
        assert_eq!(record.kind(), None);
        assert_eq!(record.version(), Some("2.0.9"));
    }

    #[test]
    fn test_six_fields_keeps_first_five() {
        let record = parse_notation("g:a:jar:linux:1.0:runtime", NotationStyle::Colon);
        assert_eq!(record.version(), Some("linux"));
        assert_eq!(record.scope(), Some("1.0"));
    }

    #[rstest]
    #[case("")]
    #[case("just-a-name")]
    #[case("group:name")]
    #[case("   padded   ")]
    fn test_colon_fallback_is_name_only(#[case] notation: &str) {
        let record = parse_notation(notation, NotationStyle::Colon);
        assert_eq!(record.name(), notation.trim());
        assert!(record.group().is_none());
        assert!(record.version().is_none());
    }

    #[rstest]
    #[case("left-pad@1.3.0", "left-pad", Some("1.3.0"))]
    #[case("@types/node@20.11.5", "@types/node", Some("20.11.5"))]
    #[case("@types/node", "@types/node", None)]
    #[case("left-pad@", "left-pad", None)]
    fn test_colon_style_splits_bare_at_notation(
        #[case] notation: &str,
        #[case] name: &str,
        #[case] version: Option<&str>,
    ) {
        let record = parse_notation(notation, NotationStyle::Colon);
        assert_eq!(record.name(), name);
        assert_eq!(record.version(), version);
        assert!(record.group().is_none());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = parse_notation(" g : a : jar : 1.0 ", NotationStyle::Colon);
        assert_eq!(record.group(), Some("g"));
        assert_eq!(record.name(), "a");
        assert_eq!(record.version(), Some("1.0"));
    }

    #[test]
    fn test_at_notation() {
        let record = parse_notation("dep-a@1.0.0", NotationStyle::At);
        assert_eq!(record.name(), "dep-a");
        assert_eq!(record.version(), Some("1.0.0"));
        assert!(record.group().is_none());
    }

    #[test]
    fn test_at_notation_scoped_package() {
        let record = parse_notation("@types/node@20.11.5", NotationStyle::At);
        assert_eq!(record.name(), "@types/node");
        assert_eq!(record.version(), Some("20.11.5"));
    }

    #[test]
    fn test_at_notation_scope_without_version() {
        let record = parse_notation("@types/node", NotationStyle::At);
        assert_eq!(record.name(), "@types/node");
        assert_eq!(record.version(), None);
    }

    #[test]
    fn test_at_notation_link_version() {
        let record = parse_notation("shared@link:../shared", NotationStyle::At);
        assert_eq!(record.name(), "shared");
        assert_eq!(record.version(), Some("link:../shared"));
    }

    #[rstest]
    #[case("org.slf4j:slf4j-api:1.7.30 -> 2.0.9", "org.slf4j:slf4j-api:2.0.9")]
    #[case("org.slf4j:slf4j-api:2.0.9 (*)", "org.slf4j:slf4j-api:2.0.9")]
    #[case("org.slf4j:slf4j-api:1.7.30 -> 2.0.9 (*)", "org.slf4j:slf4j-api:2.0.9")]
    #[case("com.fasterxml:jackson-bom:2.15.0 (c)", "com.fasterxml:jackson-bom:2.15.0")]
    #[case("io.netty:netty-bom -> 4.1.100.Final", "io.netty:netty-bom:4.1.100.Final")]
    #[case("log4j:log4j:1.2.17 -> org.apache.logging.log4j:log4j-1.2-api:2.20.0", "org.apache.logging.log4j:log4j-1.2-api:2.20.0")]
    #[case("project :core", "project :core")]
    fn test_gradle_normalization(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_notation(raw, TreeDialect::Gradle), expected);
    }

    #[test]
    fn test_pnpm_normalization_drops_annotations() {
        assert_eq!(
            normalize_notation("typescript@5.3.3 peer", TreeDialect::Pnpm),
            "typescript@5.3.3"
        );
    }

    #[test]
    fn test_parse_for_dialect_gradle_resolves_selected_version() {
        let record = parse_for_dialect("com.google.guava:guava:31.0-jre -> 32.1.3-jre (*)", TreeDialect::Gradle);
        assert_eq!(record.group(), Some("com.google.guava"));
        assert_eq!(record.name(), "guava");
        assert_eq!(record.version(), Some("32.1.3-jre"));
    }
}
