use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// of the `parse` and `detect` commands.
pub trait OutputPresenter {
    /// Presents the rendered content to the output destination
    ///
    /// # Arguments
    /// * `content` - The rendered JSON content to present
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, content: &str) -> Result<()>;
}

impl<T: OutputPresenter + ?Sized> OutputPresenter for Box<T> {
    fn present(&self, content: &str) -> Result<()> {
        (**self).present(content)
    }
}
