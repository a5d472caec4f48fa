/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (control-plane API, session, console, etc.).
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod service_catalog_repository;
pub mod service_instance_repository;
pub mod session_provider;

pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use service_catalog_repository::ServiceCatalogRepository;
pub use service_instance_repository::{PageProgressCallback, ServiceInstanceRepository};
pub use session_provider::SessionProvider;
