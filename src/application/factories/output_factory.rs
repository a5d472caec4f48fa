use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::{OutputPresenter, ReportFormatter};
use std::path::PathBuf;

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(OutputTarget::Stdout, OutputTarget::File)
    }
}

/// Factory for the presentation-side adapters
///
/// Selects a formatter and a presenter from user choices so that `main`
/// only deals with the ports.
pub struct OutputFactory;

impl OutputFactory {
    /// Creates the formatter for an output format
    ///
    /// # Examples
    /// ```
    /// use si_usage_report::application::dto::OutputFormat;
    /// use si_usage_report::application::factories::OutputFactory;
    ///
    /// let formatter = OutputFactory::formatter(OutputFormat::Json);
    /// ```
    pub fn formatter(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonReportFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownReportFormatter::new()),
        }
    }

    /// Creates the presenter for an output target
    pub fn presenter(target: OutputTarget) -> Box<dyn OutputPresenter> {
        match target {
            OutputTarget::Stdout => Box::new(StdoutPresenter::new()),
            OutputTarget::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}
