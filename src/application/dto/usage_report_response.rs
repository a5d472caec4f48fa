use crate::usage_reporting::domain::{Report, UnresolvedInstance};

/// UsageReportResponse - Internal response DTO from the usage report use case
#[derive(Debug, Clone)]
pub struct UsageReportResponse {
    /// The aggregated report
    pub report: Report,
    /// Instances dropped because their plan or offering could not be resolved
    pub unresolved: Vec<UnresolvedInstance>,
    /// Number of records returned by the API, before filtering
    pub instances_fetched: usize,
}

impl UsageReportResponse {
    pub fn new(report: Report, unresolved: Vec<UnresolvedInstance>, instances_fetched: usize) -> Self {
        Self {
            report,
            unresolved,
            instances_fetched,
        }
    }
}
