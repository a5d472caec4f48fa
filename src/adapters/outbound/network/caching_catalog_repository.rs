use crate::ports::outbound::ServiceCatalogRepository;
use crate::shared::Result;
use crate::usage_reporting::domain::PlanDetails;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingServiceCatalog wraps a ServiceCatalogRepository with in-memory caching.
///
/// Decorator over any catalog: each plan or offering GUID reaches the inner
/// repository at most once per successful lookup. Failures are not cached.
/// A plan lookup that already carries its offering name also seeds the
/// offering cache.
pub struct CachingServiceCatalog<R: ServiceCatalogRepository> {
    inner: R,
    plans: Arc<DashMap<String, PlanDetails>>,
    offerings: Arc<DashMap<String, String>>,
}

impl<R: ServiceCatalogRepository> CachingServiceCatalog<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            plans: Arc::new(DashMap::new()),
            offerings: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> (usize, usize) {
        (self.plans.len(), self.offerings.len())
    }
}

#[async_trait]
impl<R: ServiceCatalogRepository> ServiceCatalogRepository for CachingServiceCatalog<R> {
    async fn fetch_plan(&self, plan_guid: &str) -> Result<PlanDetails> {
        if let Some(cached) = self.plans.get(plan_guid) {
            tracing::trace!(plan_guid, "plan cache hit");
            return Ok(cached.clone());
        }

        let details = self.inner.fetch_plan(plan_guid).await?;

        if let (Some(guid), Some(name)) = (&details.offering_guid, &details.offering_name) {
            self.offerings.insert(guid.clone(), name.clone());
        }
        self.plans.insert(plan_guid.to_string(), details.clone());

        Ok(details)
    }

    async fn fetch_offering_name(&self, offering_guid: &str) -> Result<String> {
        if let Some(cached) = self.offerings.get(offering_guid) {
            tracing::trace!(offering_guid, "offering cache hit");
            return Ok(cached.clone());
        }

        let name = self.inner.fetch_offering_name(offering_guid).await?;
        self.offerings
            .insert(offering_guid.to_string(), name.clone());

        Ok(name)
    }
}
