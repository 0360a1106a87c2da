use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Language name and the file extensions that count towards it.
///
/// Order matters: a file counts for the first language whose extension
/// matches, and ties in the final count go to the earlier entry.
pub const LANGUAGE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("Python", &[".py"]),
    ("Java", &[".java"]),
    ("Go", &[".go"]),
    ("JavaScript", &[".js"]),
    ("TypeScript", &[".ts"]),
    ("Kotlin", &[".kt"]),
    ("Groovy", &[".groovy"]),
    ("C", &[".c"]),
    ("C++", &[".cpp", ".cc", ".cxx"]),
    ("C#", &[".cs"]),
    ("Ruby", &[".rb"]),
    ("Rust", &[".rs"]),
    ("PHP", &[".php"]),
    ("Swift", &[".swift"]),
    ("Shell", &[".sh"]),
    ("HTML", &[".html"]),
    ("CSS", &[".css"]),
    ("SQL", &[".sql"]),
    ("JSON", &[".json"]),
    ("YAML", &[".yml", ".yaml"]),
    ("Markdown", &[".md"]),
];

/// Special file label and its lowercase file name
pub const SPECIAL_FILES: &[(&str, &str)] = &[
    ("Dockerfile", "dockerfile"),
    ("DockerIgnore", ".dockerignore"),
    ("GitIgnore", ".gitignore"),
    ("EditorConfig", ".editorconfig"),
];

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Ordered `(label, count)` pairs, serialized as a JSON object
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderedCounts(Vec<(String, usize)>);

impl OrderedCounts {
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        Self(labels.into_iter().map(|l| (l.to_string(), 0)).collect())
    }

    pub fn increment(&mut self, label: &str) {
        if let Some((_, count)) = self.0.iter_mut().find(|(l, _)| l == label) {
            *count += 1;
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl Serialize for OrderedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Per-language file statistics of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageReport {
    pub language_counts: OrderedCounts,
    pub total_files: usize,
    pub languages_found: Vec<String>,
    pub special_files: OrderedCounts,
    pub detected_language: String,
}

impl LanguageReport {
    /// Human-readable summary lines for the report file
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec!["📂 File counts by language:".to_string()];
        lines.extend(
            self.language_counts
                .iter()
                .map(|(lang, count)| format!("   - {}: {} files", lang, count)),
        );
        lines.push("🛠 Special files:".to_string());
        lines.extend(
            self.special_files
                .iter()
                .map(|(name, count)| format!("   - {}: {}", name, count)),
        );
        lines.push(format!("📄 Total files in repository: {}", self.total_files));
        lines.push(format!(
            "📌 Languages found in project: {}",
            self.languages_found.join(", ")
        ));
        lines.push(format!("📌 Detected language: {}", self.detected_language));
        lines
    }
}
