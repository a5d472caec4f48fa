/// Use cases module containing application business logic orchestration
mod generate_usage_report;

pub use generate_usage_report::GenerateUsageReportUseCase;
