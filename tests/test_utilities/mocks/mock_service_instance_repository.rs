use async_trait::async_trait;
use si_usage_report::ports::outbound::PageProgressCallback;
use si_usage_report::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory ServiceInstanceRepository serving fixture records in pages
pub struct MockServiceInstanceRepository {
    pub records: Vec<ServiceInstanceRecord>,
    pub page_size: usize,
    pub empty_response: bool,
    pub calls: Arc<AtomicUsize>,
}

impl MockServiceInstanceRepository {
    pub fn new(records: Vec<ServiceInstanceRecord>) -> Self {
        Self {
            records,
            page_size: 500,
            empty_response: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulates a list call that returned no payload at all
    pub fn with_empty_response() -> Self {
        Self {
            empty_response: true,
            ..Self::new(vec![])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceInstanceRepository for MockServiceInstanceRepository {
    async fn fetch_all_service_instances_with_progress(
        &self,
        on_page: PageProgressCallback<'_>,
    ) -> Result<Vec<ServiceInstanceRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.empty_response {
            return Err(UsageReportError::EmptyUpstreamResponse {
                url: "mock://v3/service_instances".to_string(),
            }
            .into());
        }

        let total_pages = self.records.len().div_ceil(self.page_size).max(1);
        for page in 1..=total_pages {
            on_page(page, Some(total_pages));
        }
        Ok(self.records.clone())
    }
}
