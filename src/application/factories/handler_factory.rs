use crate::application::dto::{AnalysisSettings, Ecosystem};
use crate::application::handlers::{
    EcosystemHandler, GoHandler, GradleHandler, MavenHandler, NodeHandler, PythonHandler,
};

/// Factory for creating ecosystem handlers
pub struct HandlerFactory;

impl HandlerFactory {
    /// Creates the handler for one ecosystem
    ///
    /// # Examples
    /// ```
    /// use sbom_orchestrator::application::dto::Ecosystem;
    /// use sbom_orchestrator::application::factories::HandlerFactory;
    ///
    /// let handler = HandlerFactory::create(Ecosystem::Maven);
    /// assert_eq!(handler.ecosystem(), Ecosystem::Maven);
    /// ```
    pub fn create(ecosystem: Ecosystem) -> Box<dyn EcosystemHandler> {
        match ecosystem {
            Ecosystem::Go => Box::new(GoHandler::new()),
            Ecosystem::Maven => Box::new(MavenHandler::new()),
            Ecosystem::Gradle => Box::new(GradleHandler::new()),
            Ecosystem::Python => Box::new(PythonHandler::new()),
            Ecosystem::Node => Box::new(NodeHandler::new()),
        }
    }

    /// Handlers for the enabled ecosystems, in report order
    pub fn create_enabled(settings: &AnalysisSettings) -> Vec<Box<dyn EcosystemHandler>> {
        Ecosystem::ALL
            .into_iter()
            .filter(|e| settings.is_enabled(*e))
            .map(Self::create)
            .collect()
    }
}
