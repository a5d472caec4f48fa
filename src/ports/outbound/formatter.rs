use crate::shared::Result;
use crate::usage_reporting::domain::Report;

/// ReportFormatter port for rendering a usage report
pub trait ReportFormatter {
    /// Formats the report as text
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &Report) -> Result<String>;
}
