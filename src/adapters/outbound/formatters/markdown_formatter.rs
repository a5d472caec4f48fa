use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::usage_reporting::domain::Report;
use chrono::{SecondsFormat, Utc};
use std::fmt::Write;

/// Markdown table header for plan counts
const TABLE_HEADER: &str = "| Plan | Instances |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|------|-----------|\n";

/// MarkdownReportFormatter adapter for a human-readable usage report
///
/// One table per product, followed by a grand total.
pub struct MarkdownReportFormatter {
    generated_at: String,
}

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Creates a formatter with a fixed generation timestamp
    pub fn with_timestamp(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
        }
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "# Service Instance Usage Report\n")?;
        writeln!(out, "Generated: {}\n", self.generated_at)?;

        if report.is_empty() {
            writeln!(out, "_No managed service instances found._")?;
            return Ok(out);
        }

        for product in report.products() {
            writeln!(out, "## {}\n", Self::escape_cell(product.name()))?;
            out.push_str(TABLE_HEADER);
            out.push_str(TABLE_SEPARATOR);
            for plan in product.plans() {
                writeln!(
                    out,
                    "| {} | {} |",
                    Self::escape_cell(plan.plan_name()),
                    plan.instance_count()
                )?;
            }
            writeln!(out)?;
        }

        writeln!(
            out,
            "**Total: {} instance(s) across {} product(s)**",
            report.total_instances(),
            report.products().len()
        )?;
        Ok(out)
    }
}
