use crate::repository_analysis::domain::{
    LanguageReport, OrderedCounts, LANGUAGE_EXTENSIONS, SPECIAL_FILES, UNKNOWN_LANGUAGE,
};
use std::path::Path;

/// LanguageDetector counts repository files per language by extension
pub struct LanguageDetector;

impl LanguageDetector {
    /// Builds the language report for a list of repository files
    ///
    /// # Arguments
    /// * `files` - Paths of every file in the repository (relative or absolute)
    pub fn detect<P: AsRef<Path>>(files: &[P]) -> LanguageReport {
        let mut language_counts =
            OrderedCounts::from_labels(LANGUAGE_EXTENSIONS.iter().map(|(lang, _)| *lang));
        let mut special_files =
            OrderedCounts::from_labels(SPECIAL_FILES.iter().map(|(label, _)| *label));

        for file in files {
            let Some(file_name) = file.as_ref().file_name() else {
                continue;
            };
            let file_name = file_name.to_string_lossy().to_lowercase();

            if let Some((label, _)) = SPECIAL_FILES.iter().find(|(_, name)| *name == file_name) {
                special_files.increment(label);
            }
            if let Some(lang) = Self::language_of(&file_name) {
                language_counts.increment(lang);
            }
        }

        let languages_found: Vec<String> = language_counts
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(lang, _)| lang.to_string())
            .collect();

        LanguageReport {
            detected_language: Self::primary_language(&language_counts),
            language_counts,
            total_files: files.len(),
            languages_found,
            special_files,
        }
    }

    /// First language in table order whose extension ends the (lowercase) file name
    pub fn language_of(file_name: &str) -> Option<&'static str> {
        LANGUAGE_EXTENSIONS
            .iter()
            .find(|(_, exts)| exts.iter().any(|ext| file_name.ends_with(ext)))
            .map(|(lang, _)| *lang)
    }

    fn primary_language(counts: &OrderedCounts) -> String {
        let mut best: Option<(&str, usize)> = None;
        for (lang, count) in counts.iter() {
            if count > 0 && best.map_or(true, |(_, top)| count > top) {
                best = Some((lang, count));
            }
        }
        best.map_or(UNKNOWN_LANGUAGE, |(lang, _)| lang).to_string()
    }
}
