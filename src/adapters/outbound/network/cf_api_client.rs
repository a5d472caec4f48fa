use super::cf_api_wire::{OfferingResource, PlanResponse, ServiceInstancePage};
use crate::adapters::outbound::filesystem::CfSession;
use crate::ports::outbound::{
    PageProgressCallback, ServiceCatalogRepository, ServiceInstanceRepository,
};
use crate::shared::error::UsageReportError;
use crate::shared::Result;
use crate::usage_reporting::domain::{PlanDetails, ServiceInstanceRecord};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashSet;
use std::time::Duration;

pub const DEFAULT_PER_PAGE: u32 = 500;
pub const MAX_PER_PAGE: u32 = 5000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

/// Tuning knobs for [`CfApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientSettings {
    pub per_page: u32,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiClientSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ApiClientSettings {
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Outcome of a single HTTP attempt that did not produce a body
enum AttemptError {
    /// Worth another attempt: connection trouble, 429, 5xx
    Transient(anyhow::Error),
    Fatal(anyhow::Error),
}

/// CfApiClient adapter for the Cloud Controller V3 API
///
/// Implements both the instance listing and the plan/offering lookups over
/// a single pooled `reqwest::Client`. The session is captured at
/// construction; every request carries its bearer token.
///
/// # Retries
/// Each GET is attempted up to `max_retries` times with exponential backoff,
/// but only for transient failures. A 401 is never retried.
#[derive(Clone)]
pub struct CfApiClient {
    client: reqwest::Client,
    api_endpoint: String,
    authorization: String,
    settings: ApiClientSettings,
}

impl CfApiClient {
    pub fn new(session: &CfSession, settings: ApiClientSettings) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("si-usage-report/{}", version);
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(session.skip_ssl_validation())
            .build()?;

        Ok(Self {
            client,
            api_endpoint: session.api_endpoint().unwrap_or_default().to_string(),
            authorization: session.authorization_header().unwrap_or_default(),
            settings,
        })
    }

    fn first_page_url(&self) -> String {
        format!(
            "{}/v3/service_instances?per_page={}\
             &fields[service_plan]=guid,name,relationships.service_offering\
             &fields[service_plan.service_offering]=guid,name",
            self.api_endpoint, self.settings.per_page
        )
    }

    /// Resolves a `next` link; the API normally returns absolute URLs
    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.api_endpoint, href)
        } else {
            href.to_string()
        }
    }

    /// Rejects GUIDs that would change the request path
    fn validate_guid(guid: &str, kind: &str) -> Result<()> {
        if guid.trim().is_empty() {
            anyhow::bail!("{} GUID is empty", kind);
        }
        if guid.contains(['/', '\\', '?', '#', '@']) || guid.contains("..") {
            anyhow::bail!("{} GUID contains characters that are not allowed: {}", kind, guid);
        }
        Ok(())
    }

    /// Decodes one listing page
    ///
    /// An empty first page means the API produced no output at all. Any
    /// later page that is empty or undecodable is a malformed page.
    pub(crate) fn decode_page(body: &str, page: usize, url: &str) -> Result<ServiceInstancePage> {
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            if page == 1 {
                return Err(UsageReportError::EmptyUpstreamResponse {
                    url: url.to_string(),
                }
                .into());
            }
            return Err(UsageReportError::MalformedPage {
                page,
                url: url.to_string(),
                details: "empty response body".to_string(),
            }
            .into());
        }

        serde_json::from_str(trimmed).map_err(|e| {
            UsageReportError::MalformedPage {
                page,
                url: url.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }

    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let attempts = self.settings.max_retries.max(1);
        let mut backoff = self.settings.retry_backoff;
        let mut attempt = 1;

        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Transient(e)) if attempt >= attempts => return Err(e),
                Err(AttemptError::Transient(e)) => {
                    tracing::warn!(
                        url,
                        attempt,
                        max_attempts = attempts,
                        error = %e,
                        "transient CF API failure, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                    attempt += 1;
                }
            }
        }
    }

    async fn get_once(&self, url: &str) -> std::result::Result<String, AttemptError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AttemptError::Transient(e.into()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AttemptError::Fatal(UsageReportError::NotAuthenticated.into()));
        }
        if !status.is_success() {
            let error: anyhow::Error = UsageReportError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into();
            return if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                Err(AttemptError::Transient(error))
            } else {
                Err(AttemptError::Fatal(error))
            };
        }

        response
            .text()
            .await
            .map_err(|e| AttemptError::Transient(e.into()))
    }
}

#[async_trait]
impl ServiceInstanceRepository for CfApiClient {
    async fn fetch_all_service_instances_with_progress(
        &self,
        on_page: PageProgressCallback<'_>,
    ) -> Result<Vec<ServiceInstanceRecord>> {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next_url = Some(self.first_page_url());
        let mut page_number = 0;

        while let Some(url) = next_url.take() {
            page_number += 1;
            if !visited.insert(url.clone()) {
                return Err(UsageReportError::MalformedPage {
                    page: page_number,
                    url,
                    details: "pagination links back to an already fetched page".to_string(),
                }
                .into());
            }

            let body = self.get_with_retry(&url).await?;
            let page = Self::decode_page(&body, page_number, &url)?;

            tracing::debug!(
                page = page_number,
                resources = page.resources.len(),
                total_results = ?page.pagination.total_results,
                "fetched service instance page"
            );
            on_page(page_number, page.pagination.total_pages);

            next_url = page.next_href().map(|href| self.absolute_url(href));
            records.extend(page.into_records());
        }

        Ok(records)
    }
}

#[async_trait]
impl ServiceCatalogRepository for CfApiClient {
    async fn fetch_plan(&self, plan_guid: &str) -> Result<PlanDetails> {
        Self::validate_guid(plan_guid, "Service plan")?;
        let url = format!(
            "{}/v3/service_plans/{}?include=service_offering",
            self.api_endpoint,
            urlencoding::encode(plan_guid)
        );

        let body = self.get_with_retry(&url).await?;
        if body.trim().is_empty() {
            anyhow::bail!("CF API returned no output for service plan {}", plan_guid);
        }
        let response: PlanResponse = serde_json::from_str(&body)
            .map_err(|e| anyhow::anyhow!("Failed to decode service plan {}: {}", plan_guid, e))?;

        Ok(response.into_details())
    }

    async fn fetch_offering_name(&self, offering_guid: &str) -> Result<String> {
        Self::validate_guid(offering_guid, "Service offering")?;
        let url = format!(
            "{}/v3/service_offerings/{}",
            self.api_endpoint,
            urlencoding::encode(offering_guid)
        );

        let body = self.get_with_retry(&url).await?;
        if body.trim().is_empty() {
            anyhow::bail!(
                "CF API returned no output for service offering {}",
                offering_guid
            );
        }
        let offering: OfferingResource = serde_json::from_str(&body).map_err(|e| {
            anyhow::anyhow!("Failed to decode service offering {}: {}", offering_guid, e)
        })?;

        Ok(offering.name)
    }
}
