use once_cell::sync::Lazy;
use regex::Regex;

static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").expect("valid line comment pattern"));

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment pattern"));

static INCLUDE_BUILD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bincludeBuild\s*\(?\s*['"]([^'"]+)['"]"#).expect("valid includeBuild pattern")
});

/// `include ':a', ':b'` and `include(":a", ":b")`, possibly spread over lines
static INCLUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\binclude\s*\(?\s*(['"][^'"]+['"](?:\s*,\s*['"][^'"]+['"])*)"#)
        .expect("valid include pattern")
});

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid quoted pattern"));

/// Projects declared in a `settings.gradle(.kts)` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradleSettings {
    pub includes: Vec<String>,
    pub include_builds: Vec<String>,
}

impl GradleSettings {
    pub fn parse(content: &str) -> Self {
        let without_blocks = BLOCK_COMMENT.replace_all(content, "");
        let text = LINE_COMMENT.replace_all(&without_blocks, "");

        let include_builds = INCLUDE_BUILD
            .captures_iter(&text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        let includes = INCLUDE
            .captures_iter(&text)
            .filter_map(|c| c.get(1))
            .flat_map(|block| {
                QUOTED
                    .captures_iter(block.as_str())
                    .filter_map(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            includes,
            include_builds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.include_builds.is_empty()
    }

    /// Gradle project paths (`:name`) for the plain includes, under an optional build prefix
    pub fn project_paths(&self, prefix: &str) -> Vec<String> {
        self.includes
            .iter()
            .map(|inc| format!(":{}{}", prefix, inc.trim_matches(':')))
            .collect()
    }
}

/// Task name that prints a module's dependency tree
pub fn dependencies_task(module: &str) -> String {
    if module == ":" {
        "dependencies".to_string()
    } else {
        format!("{}:dependencies", module)
    }
}
