/// Network adapters for the Cloud Controller API
mod caching_catalog_repository;
mod cf_api_client;
mod cf_api_wire;

pub use caching_catalog_repository::CachingServiceCatalog;
pub use cf_api_client::{
    ApiClientSettings, CfApiClient, DEFAULT_MAX_RETRIES, DEFAULT_PER_PAGE,
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_PER_PAGE,
};
