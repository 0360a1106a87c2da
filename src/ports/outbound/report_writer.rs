use crate::shared::Result;

/// Separator line between report sections
pub const SECTION_SEPARATOR: &str = "---------------------------------------------------";

/// ReportWriter port for the consolidated plain-text report
///
/// Every analysis phase appends its findings through this port, so the
/// report reads top to bottom in execution order.
pub trait ReportWriter: Send + Sync {
    /// Appends one line (a trailing newline is added)
    ///
    /// # Errors
    /// Returns an error if the report destination cannot be written
    fn write_line(&self, line: &str) -> Result<()>;

    /// Appends every line of a multi-line block
    fn write_block(&self, text: &str) -> Result<()> {
        for line in text.lines() {
            self.write_line(line)?;
        }
        Ok(())
    }

    /// Writes a `-----Section N: Title-----` heading preceded by a blank line
    fn write_section(&self, number: &str, title: &str) -> Result<()> {
        self.write_line(&format!("\n-----Section {}: {}-----", number, title))
    }

    fn write_separator(&self) -> Result<()> {
        self.write_line(SECTION_SEPARATOR)
    }
}
