/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod usage_report_request;
mod usage_report_response;

pub use output_format::OutputFormat;
pub use usage_report_request::{
    UsageReportRequest, DEFAULT_DEADLINE_SECS, DEFAULT_MAX_CONCURRENT_LOOKUPS,
};
pub use usage_report_response::UsageReportResponse;
