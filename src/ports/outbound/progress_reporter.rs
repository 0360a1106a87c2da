/// ProgressReporter port for user-facing status lines
///
/// Handlers share one reporter while modules resolve concurrently, so
/// implementations must tolerate calls from several tasks at once.
pub trait ProgressReporter: Send + Sync {
    /// Reports a status message (cloning, detecting, running a tool)
    fn report(&self, message: &str);

    /// Reports `current` of `total` modules processed
    ///
    /// # Arguments
    /// * `current` - Modules finished so far
    /// * `total` - Modules discovered for the ecosystem
    /// * `message` - Optional label, usually the module path
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a failed module or step; processing continues
    fn report_error(&self, message: &str);

    /// Reports the end of an ecosystem or pipeline step
    fn report_completion(&self, message: &str);
}
