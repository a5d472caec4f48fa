use crate::application::dto::{UsageReportRequest, UsageReportResponse};
use crate::ports::inbound::UsageReportPort;
use crate::ports::outbound::{
    ProgressReporter, ServiceCatalogRepository, ServiceInstanceRepository, SessionProvider,
};
use crate::shared::error::UsageReportError;
use crate::shared::Result;
use crate::usage_reporting::domain::{
    ResolvedInstance, ServiceInstanceRecord, UnresolvedInstance,
};
use crate::usage_reporting::services::{InstanceResolver, LookupTable, Resolution, UsageAggregator};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};

/// Instances that survived resolution, plus diagnostics for the ones that did not
type ResolvedBatch = (Vec<ResolvedInstance>, Vec<UnresolvedInstance>);

/// GenerateUsageReportUseCase - Core use case for the usage report
///
/// Checks the session, fetches every service instance, resolves plan and
/// offering names (with concurrent, deduplicated catalog lookups), and only
/// then aggregates. The fetch-and-resolve phase runs under one deadline.
///
/// # Type Parameters
/// * `S` - SessionProvider implementation
/// * `IREPO` - ServiceInstanceRepository implementation
/// * `CREPO` - ServiceCatalogRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateUsageReportUseCase<S, IREPO, CREPO, PR> {
    session: S,
    instance_repository: IREPO,
    catalog_repository: CREPO,
    progress_reporter: PR,
}

impl<S, IREPO, CREPO, PR> GenerateUsageReportUseCase<S, IREPO, CREPO, PR>
where
    S: SessionProvider,
    IREPO: ServiceInstanceRepository,
    CREPO: ServiceCatalogRepository,
    PR: ProgressReporter,
{
    /// Creates a new GenerateUsageReportUseCase with injected dependencies
    pub fn new(
        session: S,
        instance_repository: IREPO,
        catalog_repository: CREPO,
        progress_reporter: PR,
    ) -> Self {
        Self {
            session,
            instance_repository,
            catalog_repository,
            progress_reporter,
        }
    }

    /// Executes the usage report use case
    pub async fn execute(&self, request: UsageReportRequest) -> Result<UsageReportResponse> {
        // Step 1: Refuse to touch the network without a session
        if !self.session.is_authenticated() {
            return Err(UsageReportError::NotAuthenticated.into());
        }

        // Step 2: Fetch and resolve under the deadline
        let (records_fetched, (resolved, unresolved)) =
            tokio::time::timeout(request.deadline, self.fetch_and_resolve(&request))
                .await
                .map_err(|_| UsageReportError::Timeout {
                    seconds: request.deadline.as_secs(),
                })??;

        // Step 3: Surface dropped instances without failing the run
        self.report_unresolved(&unresolved);

        // Step 4: Aggregate
        let report = UsageAggregator::aggregate(&resolved, request.plan_ordering);

        self.progress_reporter.report_completion(&format!(
            "✅ Usage report complete: {} managed instance(s) across {} product(s)",
            report.total_instances(),
            report.products().len()
        ));

        Ok(UsageReportResponse::new(report, unresolved, records_fetched))
    }

    async fn fetch_and_resolve(
        &self,
        request: &UsageReportRequest,
    ) -> Result<(usize, ResolvedBatch)> {
        let records = self.fetch_records().await?;
        let batch = self.resolve_records(&records, request).await?;
        Ok((records.len(), batch))
    }

    /// Fetches every page of service instances, reporting progress per page
    async fn fetch_records(&self) -> Result<Vec<ServiceInstanceRecord>> {
        self.progress_reporter
            .report("🔍 Fetching service instances...");

        let reporter = &self.progress_reporter;
        let records = self
            .instance_repository
            .fetch_all_service_instances_with_progress(&|pages: usize, total: Option<usize>| {
                reporter.report_progress(pages, total, Some("Fetching service instance pages..."))
            })
            .await?;

        self.progress_reporter
            .report(&format!("✅ Retrieved {} service instance(s)", records.len()));

        Ok(records)
    }

    /// Resolves plan and offering names for all records
    ///
    /// Plan lookups run first since a plan may name its offering; remaining
    /// offering GUIDs are looked up afterwards.
    async fn resolve_records(
        &self,
        records: &[ServiceInstanceRecord],
        request: &UsageReportRequest,
    ) -> Result<ResolvedBatch> {
        let mut table = LookupTable::new();

        let plan_guids = InstanceResolver::pending_plan_guids(records);
        if !plan_guids.is_empty() {
            self.progress_reporter.report(&format!(
                "📋 Resolving {} service plan(s)...",
                plan_guids.len()
            ));
            self.lookup_plans(plan_guids, request.max_concurrent_lookups(), &mut table)
                .await?;
        }

        let offering_guids = InstanceResolver::pending_offering_guids(records, &table);
        if !offering_guids.is_empty() {
            self.progress_reporter.report(&format!(
                "📋 Resolving {} service offering(s)...",
                offering_guids.len()
            ));
            self.lookup_offerings(offering_guids, request.max_concurrent_lookups(), &mut table)
                .await?;
        }

        let mut resolved = Vec::with_capacity(records.len());
        let mut unresolved = Vec::new();
        for record in records {
            match InstanceResolver::resolve(record, &table) {
                Resolution::Resolved(instance) => resolved.push(instance),
                Resolution::Unresolved(diagnostic) => unresolved.push(diagnostic),
                Resolution::Skipped => {
                    tracing::trace!(guid = record.guid(), "skipping user-provided instance");
                }
            }
        }

        Ok((resolved, unresolved))
    }

    async fn lookup_plans(
        &self,
        guids: Vec<String>,
        max_concurrent: usize,
        table: &mut LookupTable,
    ) -> Result<()> {
        let results: Vec<(String, Result<_>)> = stream::iter(guids)
            .map(|guid| async move {
                let result = self.catalog_repository.fetch_plan(&guid).await;
                (guid, result)
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

        for (guid, result) in results {
            let entry = Self::keep_or_abort(&guid, result)?;
            table.insert_plan(guid, entry);
        }
        Ok(())
    }

    async fn lookup_offerings(
        &self,
        guids: Vec<String>,
        max_concurrent: usize,
        table: &mut LookupTable,
    ) -> Result<()> {
        let results: Vec<(String, Result<_>)> = stream::iter(guids)
            .map(|guid| async move {
                let result = self.catalog_repository.fetch_offering_name(&guid).await;
                (guid, result)
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

        for (guid, result) in results {
            let entry = Self::keep_or_abort(&guid, result)?;
            table.insert_offering(guid, entry);
        }
        Ok(())
    }

    /// A failed lookup only affects the instances that depend on it, unless
    /// the failure means no further call can succeed.
    fn keep_or_abort<T>(guid: &str, result: Result<T>) -> Result<std::result::Result<T, String>> {
        match result {
            Ok(value) => Ok(Ok(value)),
            Err(e) => {
                let fatal = e
                    .downcast_ref::<UsageReportError>()
                    .is_some_and(UsageReportError::is_fatal_for_lookup);
                if fatal {
                    return Err(e);
                }
                tracing::warn!(guid, error = %e, "catalog lookup failed");
                Ok(Err(e.to_string()))
            }
        }
    }

    fn report_unresolved(&self, unresolved: &[UnresolvedInstance]) {
        for diagnostic in unresolved {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Skipping unresolved service instance {}",
                diagnostic
            ));
        }
    }
}

#[async_trait(?Send)]
impl<S, IREPO, CREPO, PR> UsageReportPort for GenerateUsageReportUseCase<S, IREPO, CREPO, PR>
where
    S: SessionProvider,
    IREPO: ServiceInstanceRepository,
    CREPO: ServiceCatalogRepository,
    PR: ProgressReporter,
{
    async fn generate_usage_report(
        &self,
        request: UsageReportRequest,
    ) -> Result<UsageReportResponse> {
        self.execute(request).await
    }
}
