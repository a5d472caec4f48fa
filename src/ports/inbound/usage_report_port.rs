use crate::application::dto::{UsageReportRequest, UsageReportResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// UsageReportPort - Inbound port for the usage report use case
///
/// This port defines the interface that external adapters (CLI, plugins, etc.)
/// use to trigger report generation. It represents the application's public API.
#[async_trait(?Send)]
pub trait UsageReportPort {
    /// Generates a service instance usage report
    ///
    /// # Returns
    /// The report plus diagnostics for instances that could not be resolved
    ///
    /// # Errors
    /// Returns a `UsageReportError` kind when:
    /// - The session is not authenticated (no network call is made)
    /// - The API returned no payload, or a malformed page
    /// - The deadline elapsed before all pages and lookups completed
    async fn generate_usage_report(&self, request: UsageReportRequest) -> Result<UsageReportResponse>;
}
