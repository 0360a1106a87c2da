use crate::dependency_tree::domain::{TreeDialect, TREE_DRAWING_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::Lines;

/// `|  \- group:artifact:jar:1.0:compile`
static MAVEN_NESTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([|\s\\+]*?)[\\+]-\s+(.+)$").expect("valid maven line pattern"));

/// `|    \--- group:artifact:1.0 -> 1.1 (*)`
static GRADLE_NESTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([|\s\\+]*?)[\\+]-+\s+(.+)$").expect("valid gradle line pattern"));

/// `│  └─┬ name@1.0.0`
static PNPM_NESTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([│├└─┬\s]*?)[├└][─┬]+\s+(.+)$").expect("valid pnpm line pattern")
});

/// `Root project 'shop'` / `Project ':app'`
static GRADLE_PROJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[Rr]oot\s+)?[Pp]roject\s+'([^']+)'").expect("valid gradle project pattern")
});

/// `runtimeClasspath - Runtime classpath of source set 'main'.`
static GRADLE_CONFIGURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][\w-]*)(?:\s+-\s+.*)?$").expect("valid gradle configuration pattern")
});

pub(crate) fn nested_pattern(dialect: TreeDialect) -> &'static Regex {
    match dialect {
        TreeDialect::Maven => &MAVEN_NESTED,
        TreeDialect::Gradle => &GRADLE_NESTED,
        TreeDialect::Pnpm => &PNPM_NESTED,
    }
}

/// One classified line of dependency-tree text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLine<'a> {
    /// Starts a new configuration
    Root { notation: &'a str },
    /// Gradle project header; labels the configurations that follow
    Project { name: &'a str },
    /// A dependency drawn below the current configuration
    Nested { prefix: &'a str, notation: &'a str },
}

/// Classifies a single line, returning `None` for blank or unrecognized lines
pub fn classify_line(line: &str, dialect: TreeDialect) -> Option<TreeLine<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if !trimmed.starts_with(TREE_DRAWING_CHARS) {
        if dialect == TreeDialect::Gradle {
            if let Some(name) = GRADLE_PROJECT.captures(trimmed).and_then(|c| c.get(1)) {
                return Some(TreeLine::Project {
                    name: name.as_str(),
                });
            }
        }
        return root_notation(trimmed, dialect).map(|notation| TreeLine::Root { notation });
    }

    let captures = nested_pattern(dialect).captures(line.trim_end())?;
    let prefix = captures.get(1).map_or("", |m| m.as_str());
    let notation = captures.get(2)?.as_str().trim();
    if notation.is_empty() {
        return None;
    }
    Some(TreeLine::Nested { prefix, notation })
}

/// Root acceptance per dialect. Maven takes the whole line; Gradle and pnpm
/// only accept their header forms so tool banners do not become configurations.
fn root_notation(trimmed: &str, dialect: TreeDialect) -> Option<&str> {
    match dialect {
        TreeDialect::Maven => Some(trimmed),
        TreeDialect::Gradle => GRADLE_CONFIGURATION
            .captures(trimmed)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str()),
        TreeDialect::Pnpm => {
            let token = trimmed.split_whitespace().next()?;
            match token.rfind('@') {
                Some(idx) if idx > 0 && idx + 1 < token.len() => Some(token),
                _ => None,
            }
        }
    }
}

/// Tokenizer over the raw text of one dependency-tree command
///
/// Lazily yields classified lines; blank lines and stray tool output are skipped.
/// The input is consumed once.
pub struct Tokenizer<'a> {
    lines: Lines<'a>,
    dialect: TreeDialect,
    skipped: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, dialect: TreeDialect) -> Self {
        Self {
            lines: text.lines(),
            dialect,
            skipped: 0,
        }
    }

    /// Non-blank lines that matched neither a root nor a nested form so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = TreeLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if line.trim().is_empty() {
                continue;
            }
            match classify_line(line, self.dialect) {
                Some(tree_line) => return Some(tree_line),
                None => {
                    self.skipped += 1;
                    tracing::trace!(dialect = %self.dialect, line, "skipping unrecognized line");
                }
            }
        }
        None
    }
}
