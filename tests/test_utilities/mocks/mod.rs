//! Mock implementations for testing
#![allow(dead_code)]

mod mock_progress_reporter;
mod mock_service_catalog;
mod mock_service_instance_repository;
mod mock_session;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_service_catalog::MockServiceCatalog;
pub use mock_service_instance_repository::MockServiceInstanceRepository;
pub use mock_session::MockSession;
