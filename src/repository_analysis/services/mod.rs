pub mod component_extractor;
pub mod dependency_manager_detector;
pub mod framework_matcher;
pub mod gradle_settings;
pub mod language_detector;

pub use component_extractor::ComponentExtractor;
pub use dependency_manager_detector::DependencyManagerDetector;
pub use framework_matcher::FrameworkMatcher;
pub use gradle_settings::{dependencies_task, GradleSettings};
pub use language_detector::LanguageDetector;
