use crate::shared::Result;
use crate::usage_reporting::domain::ServiceInstanceRecord;
use async_trait::async_trait;

/// Progress callback invoked after each page: (pages fetched, total pages if known)
pub type PageProgressCallback<'a> = &'a (dyn Fn(usize, Option<usize>) + Send + Sync);

/// ServiceInstanceRepository port for listing service instances
///
/// Implementations follow the backing API's pagination until it reports no
/// further pages and return every record visible to the session. Plan and
/// offering names are filled in when the list payload carries them.
///
/// # Errors
/// Returns a `UsageReportError` (wrapped in `anyhow::Error`) when:
/// - The session is rejected (`NotAuthenticated`)
/// - The first page has no payload at all (`EmptyUpstreamResponse`)
/// - Any page cannot be decoded (`MalformedPage`)
/// - The API answers with a non-retryable status (`UpstreamStatus`)
#[async_trait]
pub trait ServiceInstanceRepository: Send + Sync {
    /// Fetches all service instances, reporting progress per page
    async fn fetch_all_service_instances_with_progress(
        &self,
        on_page: PageProgressCallback<'_>,
    ) -> Result<Vec<ServiceInstanceRecord>>;

    /// Fetches all service instances
    async fn fetch_all_service_instances(&self) -> Result<Vec<ServiceInstanceRecord>> {
        self.fetch_all_service_instances_with_progress(&|_: usize, _: Option<usize>| {})
            .await
    }
}
