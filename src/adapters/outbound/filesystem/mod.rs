/// Filesystem adapters for file I/O operations
mod artifact_writer;
mod file_reader;
mod file_writer;
mod report_file;

pub use artifact_writer::FileSystemArtifactWriter;
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use report_file::ReportFile;
