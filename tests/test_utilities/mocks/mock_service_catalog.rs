use async_trait::async_trait;
use si_usage_report::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory ServiceCatalogRepository with call counting
#[derive(Default)]
pub struct MockServiceCatalog {
    pub plans: HashMap<String, PlanDetails>,
    pub offerings: HashMap<String, String>,
    pub plan_calls: AtomicUsize,
    pub offering_calls: AtomicUsize,
}

impl MockServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, guid: &str, name: &str, offering_guid: &str) -> Self {
        self.plans.insert(
            guid.to_string(),
            PlanDetails {
                guid: guid.to_string(),
                name: name.to_string(),
                offering_guid: Some(offering_guid.to_string()),
                offering_name: None,
            },
        );
        self
    }

    pub fn with_offering(mut self, guid: &str, name: &str) -> Self {
        self.offerings.insert(guid.to_string(), name.to_string());
        self
    }

    pub fn plan_call_count(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    pub fn offering_call_count(&self) -> usize {
        self.offering_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceCatalogRepository for MockServiceCatalog {
    async fn fetch_plan(&self, plan_guid: &str) -> Result<PlanDetails> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        self.plans
            .get(plan_guid)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("CF API request failed: plan {} returned 404", plan_guid))
    }

    async fn fetch_offering_name(&self, offering_guid: &str) -> Result<String> {
        self.offering_calls.fetch_add(1, Ordering::SeqCst);
        self.offerings.get(offering_guid).cloned().ok_or_else(|| {
            anyhow::anyhow!("CF API request failed: offering {} returned 404", offering_guid)
        })
    }
}
