use sbom_orchestrator::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ReportWriter keeping the report in memory
#[derive(Default, Clone)]
pub struct MockReportWriter {
    pub lines: Arc<Mutex<Vec<String>>>,
}

impl MockReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The report as it would appear on disk
    pub fn text(&self) -> String {
        self.lines.lock().unwrap().join("\n")
    }
}

impl ReportWriter for MockReportWriter {
    fn write_line(&self, line: &str) -> Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}
