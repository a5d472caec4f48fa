use crate::shared::Result;
use crate::usage_reporting::domain::PlanDetails;
use async_trait::async_trait;

/// ServiceCatalogRepository port for resolving plan and offering GUIDs
///
/// Used only for records whose names were not inline in the list payload.
/// Implementations must be `Send + Sync`; lookups run concurrently.
#[async_trait]
pub trait ServiceCatalogRepository: Send + Sync {
    /// Fetches a service plan by GUID
    async fn fetch_plan(&self, plan_guid: &str) -> Result<PlanDetails>;

    /// Fetches the name of a service offering by GUID
    async fn fetch_offering_name(&self, offering_guid: &str) -> Result<String>;
}
