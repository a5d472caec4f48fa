use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::usage_reporting::domain::Report;

/// JsonReportFormatter adapter rendering the report as pretty-printed JSON
///
/// The shape is the structural serialization of `Report`, which downstream
/// consumers compare against exactly.
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        Ok(json)
    }
}
