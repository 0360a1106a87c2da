/// Mock implementations for testing
mod mock_command_runner;
mod mock_progress_reporter;
mod mock_report_writer;

pub use mock_command_runner::{failed, ok, MockCommandRunner};
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_report_writer::MockReportWriter;
