/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts progress reporting (e.g., to stderr)
/// to provide user feedback during long-running operations.
/// Implementations are shared with page callbacks, hence `Send + Sync`.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress against an optional total
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value, if known
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: Option<usize>, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
