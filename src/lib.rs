//! si-usage-report - service instance usage report for Cloud Foundry
//!
//! Counts the service instances of the managed offerings (`p.mysql`,
//! `p.pcc`, `p.rabbit`, `p.redis`) visible to the logged-in CF CLI user,
//! grouped by offering and plan.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`usage_reporting`): Instance records, the report model,
//!   the managed-offering filter and the aggregator
//! - **Application Layer** (`application`): The usage report use case and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Cloud Controller client, CF CLI session,
//!   console progress and report output
//! - **Shared** (`shared`): Common error types
//!
//! # Example
//!
//! ```no_run
//! use si_usage_report::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let session = CfConfigReader::from_env().load()?;
//! let client = CfApiClient::new(&session, ApiClientSettings::default())?;
//!
//! let use_case = GenerateUsageReportUseCase::new(
//!     session,
//!     client.clone(),
//!     CachingServiceCatalog::new(client),
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case.execute(UsageReportRequest::default()).await?;
//! println!("{}", JsonReportFormatter::new().format(&response.report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ports;
pub mod shared;
pub mod usage_reporting;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CfConfigReader, CfSession, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
    pub use crate::adapters::outbound::network::{
        ApiClientSettings, CachingServiceCatalog, CfApiClient,
    };
    pub use crate::application::dto::{OutputFormat, UsageReportRequest, UsageReportResponse};
    pub use crate::application::use_cases::GenerateUsageReportUseCase;
    pub use crate::ports::inbound::UsageReportPort;
    pub use crate::ports::outbound::{
        OutputPresenter, ProgressReporter, ReportFormatter, ServiceCatalogRepository,
        ServiceInstanceRepository, SessionProvider,
    };
    pub use crate::shared::error::UsageReportError;
    pub use crate::shared::Result;
    pub use crate::usage_reporting::domain::{
        InstanceKind, Plan, PlanDetails, Product, Report, ResolvedInstance, ServiceInstanceRecord,
        UnresolvedInstance,
    };
    pub use crate::usage_reporting::policies::{ManagedOfferings, PlanOrdering};
    pub use crate::usage_reporting::services::UsageAggregator;
}
